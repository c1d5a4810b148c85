use mst_circuit::{verify_cost, CircuitError};
use thiserror::Error;
use tracing::debug;

/// Vertex count used when none is supplied.
pub const DEFAULT_VERTICES: u64 = 5;

#[derive(Error, Debug)]
pub enum CostError {
    #[error("cost for {vertices} vertices is {cost}, which does not fit in u64")]
    Overflow { vertices: u64, cost: u128 },
    #[error(transparent)]
    Proof(#[from] CircuitError),
}

/// Minimum spanning tree cost `V^2 - V + 1` for `vertices` vertices.
///
/// Evaluated as `V * (V - 1) + 1`, so counts whose square overflows but
/// whose cost still fits (e.g. `2^32`) are accepted.
pub fn mst_cost(vertices: u64) -> Result<u64, CostError> {
    if vertices == 0 {
        return Ok(1);
    }
    let cost = vertices
        .checked_mul(vertices - 1)
        .and_then(|product| product.checked_add(1))
        .ok_or_else(|| CostError::Overflow {
            vertices,
            cost: mst_cost_wide(vertices),
        })?;

    debug!(vertices, cost, "computed mst cost");
    Ok(cost)
}

/// Same formula in a 128-bit accumulator, exact for every `u64` input.
pub fn mst_cost_wide(vertices: u64) -> u128 {
    let v = vertices as u128;
    v * v - v + 1
}

/// Computes the cost and checks it against the arithmetic circuit.
pub fn proven_mst_cost(vertices: u64) -> Result<u64, CostError> {
    let cost = mst_cost(vertices)?;
    verify_cost(vertices, cost as u128)?;
    Ok(cost)
}
