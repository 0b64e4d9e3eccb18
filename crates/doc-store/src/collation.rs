//! Key ordering for view rows.
//!
//! View keys are JSON values and sort by type first, then within the
//! type: null < booleans < numbers < strings < arrays < objects.
//! Arrays compare element-wise, then by length; objects compare
//! entry-wise, then by length. This is the ordering range bounds and
//! row traversal are defined against, so compound-key sentinels work:
//! `[ts, null]` sorts below every `[ts, ip]` key and `[ts, {}]` above.

use std::cmp::Ordering;

use serde_json::Value;

/// Compares two view keys.
pub fn collate(a: &Value, b: &Value) -> Ordering {
    match type_rank(a).cmp(&type_rank(b)) {
        Ordering::Equal => collate_same_type(a, b),
        unequal => unequal,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn collate_same_type(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                match collate(x, y) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                }
            }
            a.len().cmp(&b.len())
        }
        (Value::Object(a), Value::Object(b)) => {
            for ((ak, av), (bk, bv)) in a.iter().zip(b.iter()) {
                match ak.cmp(bk) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                }
                match collate(av, bv) {
                    Ordering::Equal => {}
                    unequal => return unequal,
                }
            }
            a.len().cmp(&b.len())
        }
        // ranks matched, so the variants match
        _ => Ordering::Equal,
    }
}
