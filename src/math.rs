//! Constant-product swap quote and share accounting formulas.
//!
//! All formulas operate on the two live reserves of a pool's fixed token
//! pair, oriented by the caller's input token. Products of two amounts
//! are computed on 256-bit intermediates so that realistic 18-decimal
//! reserves never overflow; divisions truncate.
//!
//! The share rules are a matched set: deposits mint the plain product of
//! the two deposited amounts, and withdrawals divide by the product of
//! the two reserves rather than the share supply. Changing one side
//! without the other breaks the deposit/withdraw round trip.

use alloy_primitives::U256;

use crate::domain::Amount;
use crate::error::RouterError;

/// Computes the output of a constant-product swap.
///
/// With `k = reserve_in * reserve_out`:
///
/// ```text
/// new_reserve_in  = reserve_in + amount_in
/// new_reserve_out = k / new_reserve_in        (truncating)
/// amount_out      = reserve_out - new_reserve_out
/// ```
///
/// An output that would fully drain the reserve is decremented by one,
/// so no reserve ever reaches zero through a swap.
///
/// # Errors
///
/// - [`RouterError::ZeroReserve`] if either reserve is zero.
/// - [`RouterError::Overflow`] if `reserve_in + amount_in` exceeds
///   `u128`.
pub fn swap_output(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
) -> Result<Amount, RouterError> {
    let k = U256::from(reserve_in.get()) * U256::from(reserve_out.get());
    if k.is_zero() {
        return Err(RouterError::ZeroReserve);
    }

    let new_reserve_in = reserve_in
        .checked_add(&amount_in)
        .ok_or(RouterError::Overflow("swap input overflows the reserve"))?;

    // new_reserve_in >= reserve_in > 0 here, so the division is defined
    // and the quotient never exceeds reserve_out.
    let new_reserve_out = k
        .checked_div(U256::from(new_reserve_in.get()))
        .ok_or(RouterError::ZeroReserve)?;
    let new_reserve_out = u128::try_from(new_reserve_out)
        .map_err(|_| RouterError::Overflow("swap quotient exceeds u128"))?;

    let mut amount_out = reserve_out
        .get()
        .checked_sub(new_reserve_out)
        .ok_or(RouterError::Overflow("swap output underflow"))?;

    // Never drain the output reserve to zero; amount_out == reserve_out
    // implies amount_out > 0 because k > 0.
    if amount_out == reserve_out.get() {
        amount_out -= 1;
    }

    Ok(Amount::new(amount_out))
}

/// Computes the share tokens minted for a deposit: the plain product
/// `amount_x * amount_y`.
///
/// # Errors
///
/// Returns [`RouterError::Overflow`] if the product exceeds `u128`.
pub fn deposit_shares(amount_x: Amount, amount_y: Amount) -> Result<Amount, RouterError> {
    amount_x
        .checked_mul(&amount_y)
        .ok_or(RouterError::Overflow("share mint product exceeds u128"))
}

/// Computes one token's payout for a share withdrawal:
///
/// ```text
/// payout = share_amount * reserve / (reserve_a * reserve_b)   (truncating)
/// ```
///
/// The divisor is the reserve product, the counterpart of the product
/// mint rule in [`deposit_shares`].
///
/// # Errors
///
/// - [`RouterError::ZeroReserve`] if the reserve product is zero.
/// - [`RouterError::Overflow`] if the payout exceeds `u128`.
pub fn withdrawal_payout(
    share_amount: Amount,
    reserve: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
) -> Result<Amount, RouterError> {
    let product = U256::from(reserve_a.get()) * U256::from(reserve_b.get());
    if product.is_zero() {
        return Err(RouterError::ZeroReserve);
    }

    let numerator = U256::from(share_amount.get()) * U256::from(reserve.get());
    let payout = numerator
        .checked_div(product)
        .ok_or(RouterError::ZeroReserve)?;

    u128::try_from(payout)
        .map(Amount::new)
        .map_err(|_| RouterError::Overflow("withdrawal payout exceeds u128"))
}
