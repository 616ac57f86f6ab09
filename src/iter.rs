//! Iterator adapters that run an expression once per item.
//!
//! Each item is bound to a variable of the expression before it is
//! evaluated, so one parsed expression serves a whole collection.

use verdict_core::api::{Error, Expression};
use verdict_core::values::{FromValue, Value};

/// Extension trait for iterators whose items convert into [`Value`].
///
/// # Example
///
/// ```
/// use verdict::{ExpressionIterExt, Interpreter};
///
/// let interpreter = Interpreter::new();
/// let mut expr = interpreter.expression("n is greater than 2")?;
///
/// let big: Vec<i64> = [1i64, 3, 5]
///     .into_iter()
///     .filter_by("n", &mut expr)
///     .collect::<Result<_, _>>()?;
/// assert_eq!(big, vec![3, 5]);
/// # Ok::<(), verdict::Error>(())
/// ```
pub trait ExpressionIterExt: Iterator + Sized {
    /// Keep the items for which `expression` evaluates to `true`.
    ///
    /// `false` and `Null` drop the item; any other result is an error.
    fn filter_by<'e>(self, variable: &'e str, expression: &'e mut Expression) -> FilterBy<'e, Self>
    where
        Self::Item: Clone + Into<Value>,
    {
        FilterBy {
            iter: self,
            variable,
            expression,
        }
    }

    /// Evaluate `expression` for each item and convert the result.
    fn map_by<'e, T>(self, variable: &'e str, expression: &'e mut Expression) -> MapBy<'e, Self, T>
    where
        Self::Item: Into<Value>,
        T: FromValue,
    {
        MapBy {
            iter: self,
            variable,
            expression,
            output: core::marker::PhantomData,
        }
    }
}

impl<I: Iterator> ExpressionIterExt for I {}

/// Iterator returned by [`ExpressionIterExt::filter_by`].
pub struct FilterBy<'e, I> {
    iter: I,
    variable: &'e str,
    expression: &'e mut Expression,
}

impl<I> Iterator for FilterBy<'_, I>
where
    I: Iterator,
    I::Item: Clone + Into<Value>,
{
    type Item = Result<I::Item, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.iter.by_ref() {
            match keeps(self.expression, self.variable, item.clone().into()) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

fn keeps(expression: &mut Expression, variable: &str, item: Value) -> Result<bool, Error> {
    expression.set_variable(variable, item)?;
    match expression.evaluate()? {
        Value::Bool(keep) => Ok(keep),
        Value::Null => Ok(false),
        other => Err(Error::Conversion {
            expected: "Bool".into(),
            found: other.type_name(),
        }),
    }
}

/// Iterator returned by [`ExpressionIterExt::map_by`].
pub struct MapBy<'e, I, T> {
    iter: I,
    variable: &'e str,
    expression: &'e mut Expression,
    output: core::marker::PhantomData<fn() -> T>,
}

impl<I, T> Iterator for MapBy<'_, I, T>
where
    I: Iterator,
    I::Item: Into<Value>,
    T: FromValue,
{
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        Some(
            self.expression
                .set_variable(self.variable, item)
                .and_then(|()| self.expression.evaluate_as::<T>()),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
