use halo2_proofs::arithmetic::FieldExt;
use halo2_proofs::circuit::{AssignedCell, Chip, Layouter, SimpleFloorPlanner, Value};
use halo2_proofs::dev::MockProver;
use halo2_proofs::pasta::Fp;
use halo2_proofs::plonk::{
    Advice, Circuit, Column, ConstraintSystem, Error, Fixed, Instance, Selector,
};
use halo2_proofs::poly::Rotation;
use tracing::debug;

/// Rows available to the circuit are `2^K`.
pub const K: u32 = 4;

#[derive(thiserror::Error, Debug)]
pub enum CircuitError {
    #[error("failed to synthesize the cost circuit: {0}")]
    Synthesis(#[from] Error),
    #[error("cost {claimed} for {vertices} vertices violates {failures} constraint(s)")]
    Unsatisfied {
        vertices: u64,
        claimed: u128,
        failures: usize,
    },
}

pub trait NumericInstructions {
    type Num;

    fn load_private(&self, layouter: impl Layouter<Fp>, x: Value<Fp>) -> Result<Self::Num, Error>;
    fn load_constant(&self, layouter: impl Layouter<Fp>, x: Fp) -> Result<Self::Num, Error>;

    fn mul(
        &self,
        layouter: impl Layouter<Fp>,
        a: Self::Num,
        b: Self::Num,
    ) -> Result<Self::Num, Error>;

    fn sub(
        &self,
        layouter: impl Layouter<Fp>,
        a: Self::Num,
        b: Self::Num,
    ) -> Result<Self::Num, Error>;

    fn add(
        &self,
        layouter: impl Layouter<Fp>,
        a: Self::Num,
        b: Self::Num,
    ) -> Result<Self::Num, Error>;

    fn expose_public(
        &self,
        layouter: impl Layouter<Fp>,
        num: Self::Num,
        row: usize,
    ) -> Result<(), Error>;
}

#[derive(Clone, Debug)]
pub struct FieldConfig {
    advice: [Column<Advice>; 2],
    instance: Column<Instance>,
    s_mul: Selector,
    s_sub: Selector,
    s_add: Selector,
}

pub struct FieldChip {
    config: FieldConfig,
}

impl Chip<Fp> for FieldChip {
    type Config = FieldConfig;
    type Loaded = ();

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn loaded(&self) -> &Self::Loaded {
        &()
    }
}

impl FieldChip {
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    pub fn configure(
        meta: &mut ConstraintSystem<Fp>,
        advice: [Column<Advice>; 2],
        instance: Column<Instance>,
        constant: Column<Fixed>,
    ) -> FieldConfig {
        meta.enable_constant(constant);
        meta.enable_equality(instance);

        for column in &advice {
            meta.enable_equality(*column);
        }

        let s_mul = meta.selector();
        let s_sub = meta.selector();
        let s_add = meta.selector();
        meta.create_gate("mul|sub|add", |meta| {
            //   y = x^2 - x + 1
            //  +---------+------+-------+-------+-------+
            //  |   a_0   | a_1  | s_mul | s_sub | s_add |
            //  +---------+------+-------+-------+-------+
            //  |    x    |  x   |   1   |   0   |   0   |
            //  |   x^2   |  x   |   0   |   1   |   0   |
            //  | x^2 - x |  1   |   0   |   0   |   1   |
            //  +---------+------+-------+-------+-------+

            let a_0 = meta.query_advice(advice[0], Rotation::cur());
            let a_1 = meta.query_advice(advice[1], Rotation::cur());
            let out = meta.query_advice(advice[0], Rotation::next());

            let s_mul = meta.query_selector(s_mul);
            let s_sub = meta.query_selector(s_sub);
            let s_add = meta.query_selector(s_add);

            // s_mul != 0 constrains a_0 * a_1 = out.
            let mul = s_mul * (a_0.clone() * a_1.clone() - out.clone());
            // s_sub != 0 constrains a_0 - a_1 = out.
            let sub = s_sub * (a_0.clone() - a_1.clone() - out.clone());
            // s_add != 0 constrains a_0 + a_1 = out.
            let add = s_add * (a_0 + a_1 - out);

            vec![mul, sub, add]
        });

        FieldConfig {
            advice,
            instance,
            s_mul,
            s_sub,
            s_add,
        }
    }

    /// Copies `a` and `b` into a fresh two-row region guarded by `selector`
    /// and assigns `op(a, b)` as the output on the second row.
    fn binary_op(
        &self,
        mut layouter: impl Layouter<Fp>,
        name: &'static str,
        selector: Selector,
        a: Number,
        b: Number,
        op: impl Fn(Value<Fp>, Value<Fp>) -> Value<Fp>,
    ) -> Result<Number, Error> {
        let config = self.config();
        layouter.assign_region(
            || name,
            |mut region| {
                selector.enable(&mut region, 0)?;

                a.0.copy_advice(|| "lhs", &mut region, config.advice[0], 0)?;
                b.0.copy_advice(|| "rhs", &mut region, config.advice[1], 0)?;

                let value = op(a.0.value().copied(), b.0.value().copied());
                region
                    .assign_advice(|| name, config.advice[0], 1, || value)
                    .map(Number)
            },
        )
    }
}

#[derive(Clone, Debug)]
pub struct Number(AssignedCell<Fp, Fp>);

impl NumericInstructions for FieldChip {
    type Num = Number;

    fn load_private(
        &self,
        mut layouter: impl Layouter<Fp>,
        x: Value<Fp>,
    ) -> Result<Self::Num, Error> {
        let config = self.config();

        layouter.assign_region(
            || "load private",
            |mut region| {
                region
                    .assign_advice(|| "vertex count", config.advice[0], 0, || x)
                    .map(Number)
            },
        )
    }

    fn load_constant(&self, mut layouter: impl Layouter<Fp>, x: Fp) -> Result<Self::Num, Error> {
        let config = self.config();

        layouter.assign_region(
            || "load constant",
            |mut region| {
                region
                    .assign_advice_from_constant(|| "constant value", config.advice[0], 0, x)
                    .map(Number)
            },
        )
    }

    fn mul(
        &self,
        layouter: impl Layouter<Fp>,
        a: Self::Num,
        b: Self::Num,
    ) -> Result<Self::Num, Error> {
        self.binary_op(layouter, "mul", self.config.s_mul, a, b, |a, b| a * b)
    }

    fn sub(
        &self,
        layouter: impl Layouter<Fp>,
        a: Self::Num,
        b: Self::Num,
    ) -> Result<Self::Num, Error> {
        self.binary_op(layouter, "sub", self.config.s_sub, a, b, |a, b| a - b)
    }

    fn add(
        &self,
        layouter: impl Layouter<Fp>,
        a: Self::Num,
        b: Self::Num,
    ) -> Result<Self::Num, Error> {
        self.binary_op(layouter, "add", self.config.s_add, a, b, |a, b| a + b)
    }

    fn expose_public(
        &self,
        mut layouter: impl Layouter<Fp>,
        num: Self::Num,
        row: usize,
    ) -> Result<(), Error> {
        let config = self.config();
        layouter.constrain_instance(num.0.cell(), config.instance, row)
    }
}

/// Constrains `x^2 - x + constant` and exposes it as public input 0.
#[derive(Default)]
pub struct MstCostCircuit {
    constant: Fp,
    x: Value<Fp>,
}

impl MstCostCircuit {
    pub fn new(vertices: u64) -> Self {
        Self {
            constant: Fp::one(),
            x: Value::known(Fp::from(vertices)),
        }
    }
}

impl Circuit<Fp> for MstCostCircuit {
    type Config = FieldConfig;
    type FloorPlanner = SimpleFloorPlanner;

    fn without_witnesses(&self) -> Self {
        Self {
            constant: self.constant,
            x: Value::unknown(),
        }
    }

    fn configure(meta: &mut ConstraintSystem<Fp>) -> FieldConfig {
        let advice = [meta.advice_column(), meta.advice_column()];
        let instance = meta.instance_column();
        let constant = meta.fixed_column();

        FieldChip::configure(meta, advice, instance, constant)
    }

    fn synthesize(
        &self,
        config: FieldConfig,
        mut layouter: impl Layouter<Fp>,
    ) -> Result<(), Error> {
        let chip = FieldChip::new(config);

        let x = chip.load_private(layouter.namespace(|| "load x"), self.x)?;
        let constant = chip.load_constant(layouter.namespace(|| "load constant"), self.constant)?;

        let x2 = chip.mul(layouter.namespace(|| "x^2"), x.clone(), x.clone())?;
        let x2_minus_x = chip.sub(layouter.namespace(|| "x^2 - x"), x2, x)?;
        let cost = chip.add(
            layouter.namespace(|| "x^2 - x + 1"),
            x2_minus_x,
            constant,
        )?;

        chip.expose_public(layouter.namespace(|| "expose cost"), cost, 0)
    }
}

/// Checks with `MockProver` that `claimed` is the cost for `vertices`.
pub fn verify_cost(vertices: u64, claimed: u128) -> Result<(), CircuitError> {
    let circuit = MstCostCircuit::new(vertices);
    let public_inputs = vec![Fp::from_u128(claimed)];

    let prover = MockProver::run(K, &circuit, vec![public_inputs])?;
    match prover.verify() {
        Ok(()) => {
            debug!(vertices, claimed = %claimed, "cost circuit satisfied");
            Ok(())
        }
        Err(failures) => Err(CircuitError::Unsatisfied {
            vertices,
            claimed,
            failures: failures.len(),
        }),
    }
}
