//! Numeric utilities over [`Dec`] used by consensus-relevant scoring.
//!
//! Every formula here is computed in one fixed, specified sub-step order.
//! Each multiply, divide, exponential and logarithm rounds independently
//! under the wide context, so a mathematically equivalent but
//! differently-ordered computation can produce a different final value —
//! and a different value on one node forks the network. Callers must not
//! reorder or parallelize the steps.

use crate::{dec::Dec, error::DecError};

/// Exponential moving average: `alpha*current + (1-alpha)*previous`.
///
/// When `first_time` is set, or `current == previous`, `current` is
/// returned untouched. The short-circuit is documented behavior, not an
/// optimization: pushing `current` through a redundant rounding pass could
/// differ from `current` itself by a rounding ulp.
pub fn calc_ema(
    alpha: &Dec,
    current: &Dec,
    previous: &Dec,
    first_time: bool,
) -> Result<Dec, DecError> {
    if first_time || current.equal(previous) {
        return Ok(current.clone());
    }

    let weighted_current = alpha.mul(current)?;
    let remainder = Dec::one().sub(alpha)?;
    let weighted_previous = remainder.mul(previous)?;

    weighted_current.add(&weighted_previous)
}

/// Exponential decay: `(1 - decay_factor) * current_value`.
pub fn calc_exp_decay(current_value: &Dec, decay_factor: &Dec) -> Result<Dec, DecError> {
    let keep = Dec::one().sub(decay_factor)?;

    keep.mul(current_value)
}

/// Population standard deviation: mean over `n`, squared deviations over
/// `n` (not `n-1`), square root.
///
/// Any arithmetic error on any element aborts immediately and propagates;
/// there is no partial or best-effort result.
pub fn std_dev(values: &[Dec]) -> Result<Dec, DecError> {
    let n = Dec::from_i64(i64::try_from(values.len()).unwrap_or(i64::MAX));

    let mut sum = Dec::zero();
    for value in values {
        sum = sum.add(value)?;
    }
    let mean = sum.quo(&n)?;

    let mut squared = Dec::zero();
    for value in values {
        let deviation = value.sub(&mean)?;
        squared = squared.add(&deviation.mul(&deviation)?)?;
    }
    let variance = squared.quo(&n)?;

    variance.sqrt()
}

/// Logistic gradient: `p / (exp(p*(c - x)) + 1)`, in exactly this
/// sub-step order.
pub fn gradient(p: &Dec, c: &Dec, x: &Dec) -> Result<Dec, DecError> {
    let offset = c.sub(x)?;
    let scaled = p.mul(&offset)?;
    let grown = scaled.exp()?;
    let denominator = grown.add(&Dec::one())?;

    p.quo(&denominator)
}

/// Logistic potential: `ln(1 + exp(p*(x - c)))`, in exactly this
/// sub-step order.
pub fn phi(p: &Dec, c: &Dec, x: &Dec) -> Result<Dec, DecError> {
    let offset = x.sub(c)?;
    let scaled = p.mul(&offset)?;
    let grown = scaled.exp()?;
    let shifted = grown.add(&Dec::one())?;

    shifted.ln()
}

/// Median over a deterministic ascending sort; even-length input averages
/// the two midpoints.
pub fn median(values: &[Dec]) -> Result<Dec, DecError> {
    if values.is_empty() {
        return Err(DecError::out_of_range("median of empty slice"));
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return Ok(sorted[mid].clone());
    }

    let sum = sorted[mid - 1].add(&sorted[mid])?;
    sum.quo(&Dec::from_i64(2))
}

/// Weighted percentiles with linear interpolation, over data sorted
/// ascending (stable, so equal values keep input order).
///
/// Positions follow `(cumulative - weight/2) / total`; targets outside the
/// covered band clamp to the extreme data points. `data` and `weights`
/// must be the same length; percentiles must lie in `[0, 100]`.
pub fn weighted_percentile(
    data: &[Dec],
    weights: &[Dec],
    percentiles: &[Dec],
) -> Result<Vec<Dec>, DecError> {
    if data.len() != weights.len() {
        return Err(DecError::NotMatchingLength {
            left: data.len(),
            right: weights.len(),
        });
    }
    if data.is_empty() {
        return Err(DecError::out_of_range("weighted percentile of empty slice"));
    }

    let hundred = Dec::from_i64(100);
    for percentile in percentiles {
        if percentile.is_negative() || percentile.gt(&hundred) {
            return Err(DecError::out_of_range(format!(
                "percentile must lie in [0, 100]: {percentile}"
            )));
        }
    }

    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].cmp(&data[b]));

    let mut total = Dec::zero();
    for index in &order {
        total = total.add(&weights[*index])?;
    }

    let two = Dec::from_i64(2);
    let mut positions = Vec::with_capacity(order.len());
    let mut cumulative = Dec::zero();
    for index in &order {
        let weight = &weights[*index];
        cumulative = cumulative.add(weight)?;
        let centered = cumulative.sub(&weight.quo(&two)?)?;
        positions.push(centered.quo(&total)?);
    }

    let mut results = Vec::with_capacity(percentiles.len());
    for percentile in percentiles {
        let target = percentile.quo(&hundred)?;
        results.push(interpolate(&order, data, &positions, &target)?);
    }

    Ok(results)
}

fn interpolate(
    order: &[usize],
    data: &[Dec],
    positions: &[Dec],
    target: &Dec,
) -> Result<Dec, DecError> {
    let last = positions.len() - 1;
    if target.lte(&positions[0]) {
        return Ok(data[order[0]].clone());
    }
    if target.gte(&positions[last]) {
        return Ok(data[order[last]].clone());
    }

    let mut lower = 0;
    while positions[lower + 1].lt(target) {
        lower += 1;
    }

    let lower_value = &data[order[lower]];
    let upper_value = &data[order[lower + 1]];
    let span = positions[lower + 1].sub(&positions[lower])?;
    if span.is_zero() {
        return Ok(upper_value.clone());
    }

    let offset = target.sub(&positions[lower])?;
    let fraction = offset.quo(&span)?;
    let delta = upper_value.sub(lower_value)?;

    lower_value.add(&fraction.mul(&delta)?)
}

///
/// TESTS
///
