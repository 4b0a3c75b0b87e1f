//! Arithmetic, comparison and logical opcodes.
//!
//! Division and modulo truncate toward zero, matching `BigInt`'s
//! operators. Shifts take a bounded count and never clamp the result
//! width.

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::MAX_SHIFT;
use crate::stack_item::StackItem;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

pub(crate) fn inc(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    engine.push(StackItem::Integer(value + 1));
    Ok(())
}

pub(crate) fn dec(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    engine.push(StackItem::Integer(value - 1));
    Ok(())
}

pub(crate) fn sign(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    let result = if value.is_zero() {
        0
    } else if value.is_positive() {
        1
    } else {
        -1
    };
    engine.push(StackItem::from_int(result));
    Ok(())
}

pub(crate) fn negate(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    engine.push(StackItem::Integer(-value));
    Ok(())
}

pub(crate) fn abs(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    engine.push(StackItem::Integer(value.abs()));
    Ok(())
}

/// NOT: logical negation of truthiness.
pub(crate) fn not(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    engine.push(StackItem::from_bool(!args[0].as_bool()));
    Ok(())
}

/// NZ: true when the value is non-zero.
pub(crate) fn nz(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    engine.push(StackItem::from_bool(!value.is_zero()));
    Ok(())
}

pub(crate) fn add(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(left + right));
    Ok(())
}

pub(crate) fn sub(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(left - right));
    Ok(())
}

pub(crate) fn mul(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(left * right));
    Ok(())
}

pub(crate) fn div(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    if right.is_zero() {
        return Err(VmError::DivisionByZero);
    }
    engine.push(StackItem::Integer(left / right));
    Ok(())
}

pub(crate) fn modulo(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    if right.is_zero() {
        return Err(VmError::DivisionByZero);
    }
    engine.push(StackItem::Integer(left % right));
    Ok(())
}

fn shift_count(item: &StackItem) -> VmResult<i64> {
    let count = item
        .as_int()?
        .to_i64()
        .ok_or(VmError::ShiftOutOfRange {
            value: i64::MAX,
            max: MAX_SHIFT,
        })?;
    if count < 0 || count > MAX_SHIFT {
        return Err(VmError::ShiftOutOfRange {
            value: count,
            max: MAX_SHIFT,
        });
    }
    Ok(count)
}

pub(crate) fn shl(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let count = shift_count(&args[0])?;
    let value = args[1].as_int()?;
    engine.push(StackItem::Integer(value << count as usize));
    Ok(())
}

pub(crate) fn shr(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let count = shift_count(&args[0])?;
    let value = args[1].as_int()?;
    engine.push(StackItem::Integer(value >> count as usize));
    Ok(())
}

pub(crate) fn bool_and(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let result = args[0].as_bool() && args[1].as_bool();
    engine.push(StackItem::from_bool(result));
    Ok(())
}

pub(crate) fn bool_or(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let result = args[0].as_bool() || args[1].as_bool();
    engine.push(StackItem::from_bool(result));
    Ok(())
}

pub(crate) fn num_equal(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::from_bool(left == right));
    Ok(())
}

pub(crate) fn num_not_equal(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::from_bool(left != right));
    Ok(())
}

pub(crate) fn lt(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::from_bool(left < right));
    Ok(())
}

pub(crate) fn gt(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::from_bool(left > right));
    Ok(())
}

pub(crate) fn lte(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::from_bool(left <= right));
    Ok(())
}

pub(crate) fn gte(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::from_bool(left >= right));
    Ok(())
}

pub(crate) fn min(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(BigInt::min(left, right)));
    Ok(())
}

pub(crate) fn max(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(BigInt::max(left, right)));
    Ok(())
}

/// WITHIN: `a <= x < b` for `(x a b)` on the stack.
pub(crate) fn within(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let b = args[0].as_int()?;
    let a = args[1].as_int()?;
    let x = args[2].as_int()?;
    engine.push(StackItem::from_bool(a <= x && x < b));
    Ok(())
}
