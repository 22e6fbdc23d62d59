//! Core element types used by the pipeline operations.
//!
//! Pipelines are generic over their element type; this module only holds the pieces that need a
//! concrete shape: the [`Employee`] record, the [`Numeric`] bound used by aggregates and the
//! [`BinaryOperation`] function interface.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// An immutable employee record.
///
/// Equality is structural over all four fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Registration number.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Monthly salary.
    pub salary: f64,
    /// Department code (e.g. `"TI"`).
    pub department: String,
}

impl Employee {
    /// Create a new record.
    pub fn new(id: i64, name: impl Into<String>, salary: f64, department: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            salary,
            department: department.into(),
        }
    }

    /// Returns `true` if the employee belongs to `department` (exact match).
    pub fn works_in(&self, department: &str) -> bool {
        self.department == department
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matricula: {} | Nome: {:<20} | Salario: {:.2} | Departamento: {}",
            self.id, self.name, self.salary, self.department
        )
    }
}

/// Numeric element bound for aggregate operations.
///
/// `ZERO` is the additive identity returned by `sum` over an empty sequence. Averages are always
/// computed in `f64`.
pub trait Numeric: Copy + PartialOrd + Add<Output = Self> {
    /// Additive identity.
    const ZERO: Self;

    /// Lossy conversion used by `average`.
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric {
    ($zero:expr => $($t:ty),+ $(,)?) => {
        $(
            impl Numeric for $t {
                const ZERO: Self = $zero;

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )+
    };
}

impl_numeric!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric!(0.0 => f32, f64);

/// A binary integer operation passed around as a value.
///
/// Any `Fn(i64, i64) -> i64` closure implements it.
pub trait BinaryOperation {
    fn apply(&self, a: i64, b: i64) -> i64;
}

impl<F> BinaryOperation for F
where
    F: Fn(i64, i64) -> i64,
{
    fn apply(&self, a: i64, b: i64) -> i64 {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryOperation, Employee, Numeric};

    #[test]
    fn employee_display_pads_name_and_formats_salary() {
        let e = Employee::new(1, "Ana", 1200.0, "TI");
        assert_eq!(
            e.to_string(),
            "Matricula: 1 | Nome: Ana                  | Salario: 1200.00 | Departamento: TI"
        );
    }

    #[test]
    fn employee_equality_is_structural() {
        let a = Employee::new(4, "Marcos", 1800.0, "TI");
        let b = Employee::new(4, "Marcos".to_string(), 1800.0, "TI".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Employee::new(4, "Marcos", 1800.5, "TI"));
        assert!(a.works_in("TI"));
        assert!(!a.works_in("ti"));
    }

    #[test]
    fn numeric_zero_and_conversion() {
        assert_eq!(i32::ZERO, 0);
        assert_eq!(f64::ZERO, 0.0);
        assert_eq!(67i64.to_f64(), 67.0);
        assert_eq!(2.5f32.to_f64(), 2.5);
    }

    #[test]
    fn closures_are_binary_operations() {
        let sum = |a: i64, b: i64| a + b;
        assert_eq!(sum.apply(5, 3), 8);

        fn run(op: &dyn BinaryOperation) -> i64 {
            op.apply(6, 7)
        }
        assert_eq!(run(&|a: i64, b: i64| a * b), 42);
    }
}
