//! Condition evaluation against runtime state.

use storyscript_data::{CmpOp, Condition, Value};

use crate::state::StoryState;

/// Evaluate a condition. Never fails: unknown flags and type mismatches
/// degrade to false (except `!=`, which an unset flag satisfies).
pub fn eval(cond: &Condition, state: &StoryState) -> bool {
    match cond {
        Condition::Has { item } => state.inventory.contains(item),
        Condition::At { scene } => state.current_scene == *scene,
        Condition::Not { inner } => !eval(inner, state),
        Condition::Compare { flag, op, value } => compare(state.flags.get(flag), *op, value),
        Condition::Truthy { flag } => state.flags.get(flag).is_some_and(Value::is_truthy),
        Condition::And { left, right } => eval(left, state) && eval(right, state),
        Condition::Or { left, right } => eval(left, state) || eval(right, state),
    }
}

fn compare(left: Option<&Value>, op: CmpOp, right: &Value) -> bool {
    let Some(left) = left else {
        // undefined operand: only inequality can hold
        return op == CmpOp::Ne;
    };
    match op {
        CmpOp::Eq => left == right,
        CmpOp::Ne => left != right,
        // ordering assumes numeric operands; anything else is false
        CmpOp::Gt | CmpOp::Lt | CmpOp::Ge | CmpOp::Le => {
            let (Some(l), Some(r)) = (left.as_number(), right.as_number()) else {
                return false;
            };
            match op {
                CmpOp::Gt => l > r,
                CmpOp::Lt => l < r,
                CmpOp::Ge => l >= r,
                CmpOp::Le => l <= r,
                _ => false,
            }
        },
    }
}
