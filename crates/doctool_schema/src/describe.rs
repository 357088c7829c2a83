//! Self-describing values.
//!
//! [`Describe`] is implemented by anything that can produce a [`Target`]:
//! the description types themselves, [`Described`] wrappers around callable
//! values, and the types generated by `#[describe]`. [`ToSchema`] adds
//! `to_schema` to all of them.

use crate::convert::{Converter, Format, Output};
use crate::error::ConvertError;
use crate::signature::{Callable, Class, Target};

/// A value that can describe itself as a conversion target.
pub trait Describe {
    /// Returns the target to convert.
    fn target(&self) -> Target;
}

/// A type whose description does not depend on an instance.
///
/// Implemented by `#[describe]` for the generated `<Name>Schema` structs and
/// for described structs.
pub trait DescribeType {
    /// Returns the target to convert.
    fn describe_type() -> Target;
}

impl Describe for Target {
    fn target(&self) -> Target {
        self.clone()
    }
}

impl Describe for Callable {
    fn target(&self) -> Target {
        Target::Function(self.clone())
    }
}

impl Describe for Class {
    fn target(&self) -> Target {
        Target::Class(self.clone())
    }
}

/// A callable value paired with its description.
///
/// ```
/// use doctool_schema::{Callable, Described, Format, Signature, ToSchema};
///
/// let add = Described::new(
///     |a: i64, b: i64| a + b,
///     Callable::new("add").with_signature(Signature::new().required("a").required("b")),
/// );
/// assert_eq!((add.callable())(2, 3), 5);
/// let schema = add.to_schema(Format::Structured).unwrap().into_schema().unwrap();
/// assert_eq!(schema.function.parameters.required, ["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct Described<F> {
    callable: F,
    target: Target,
}

impl<F> Described<F> {
    /// Pairs `callable` with `target`.
    pub fn new(callable: F, target: impl Into<Target>) -> Self {
        Self {
            callable,
            target: target.into(),
        }
    }

    /// The wrapped callable.
    pub fn callable(&self) -> &F {
        &self.callable
    }

    /// Unwraps the callable.
    pub fn into_inner(self) -> F {
        self.callable
    }
}

impl<F> Describe for Described<F> {
    fn target(&self) -> Target {
        self.target.clone()
    }
}

/// Conversion shorthand for every [`Describe`] implementor.
pub trait ToSchema: Describe {
    /// Converts with the default converter.
    fn to_schema(&self, format: Format) -> Result<Output, ConvertError> {
        self.to_schema_with(&Converter::default(), format)
    }

    /// Converts with the given converter.
    fn to_schema_with(
        &self,
        converter: &Converter,
        format: Format,
    ) -> Result<Output, ConvertError> {
        converter.convert(&self.target(), format)
    }
}

impl<T: Describe + ?Sized> ToSchema for T {}

/// Converts a described value with the default converter.
pub fn to_schema<T: Describe + ?Sized>(value: &T, format: Format) -> Result<Output, ConvertError> {
    value.to_schema(format)
}

/// Converts a described type with the default converter.
pub fn schema_of<T: DescribeType>(format: Format) -> Result<Output, ConvertError> {
    Converter::default().convert(&T::describe_type(), format)
}
