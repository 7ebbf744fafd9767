//! Cursor handling for statements.
//!
//! ODBC-based SQL Server drivers refuse to bind or execute a statement
//! whose previous result cursor is still open. [`CursorGuard`] wraps a
//! statement and closes the cursor before every bind and execute.

use tracing::trace;

/// Parameter types understood by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// SQL NULL.
    Null,
    /// Integer.
    Integer,
    /// String.
    String,
    /// Large object (stream).
    LargeObject,
    /// Boolean. The driver cannot bind it; it is sent as an integer.
    Boolean,
}

/// The subset of a driver statement the guard needs.
pub trait DriverStatement {
    /// Parameter value type.
    type Value;
    /// Driver error type.
    type Error;

    /// Closes the current result cursor, if any.
    ///
    /// # Errors
    ///
    /// Returns the driver error.
    fn close_cursor(&mut self) -> Result<(), Self::Error>;

    /// Binds a value to a 1-based parameter position.
    ///
    /// # Errors
    ///
    /// Returns the driver error.
    fn bind_value(
        &mut self,
        position: usize,
        value: Self::Value,
        param_type: ParamType,
    ) -> Result<(), Self::Error>;

    /// Executes the statement, optionally with positional parameters.
    ///
    /// # Errors
    ///
    /// Returns the driver error.
    fn execute(&mut self, params: Option<Vec<Self::Value>>) -> Result<(), Self::Error>;
}

/// Statement wrapper closing the cursor before each bind and execute.
#[derive(Debug)]
pub struct CursorGuard<S> {
    inner: S,
}

impl<S: DriverStatement> CursorGuard<S> {
    /// Wraps a statement.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped statement.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the statement.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DriverStatement> DriverStatement for CursorGuard<S> {
    type Value = S::Value;
    type Error = S::Error;

    fn close_cursor(&mut self) -> Result<(), Self::Error> {
        self.inner.close_cursor()
    }

    fn bind_value(
        &mut self,
        position: usize,
        value: Self::Value,
        param_type: ParamType,
    ) -> Result<(), Self::Error> {
        self.inner.close_cursor()?;

        let param_type = match param_type {
            ParamType::Boolean => ParamType::Integer,
            other => other,
        };
        trace!(position, ?param_type, "Binding parameter");
        self.inner.bind_value(position, value, param_type)
    }

    fn execute(&mut self, params: Option<Vec<Self::Value>>) -> Result<(), Self::Error> {
        self.inner.close_cursor()?;
        self.inner.execute(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Close,
        Bind(usize, i64, ParamType),
        Execute(Option<Vec<i64>>),
    }

    #[derive(Default)]
    struct FakeStatement {
        calls: Vec<Call>,
        fail_close: bool,
    }

    impl DriverStatement for FakeStatement {
        type Value = i64;
        type Error = String;

        fn close_cursor(&mut self) -> Result<(), String> {
            self.calls.push(Call::Close);
            if self.fail_close {
                return Err("cursor busy".to_string());
            }
            Ok(())
        }

        fn bind_value(&mut self, position: usize, value: i64, ty: ParamType) -> Result<(), String> {
            self.calls.push(Call::Bind(position, value, ty));
            Ok(())
        }

        fn execute(&mut self, params: Option<Vec<i64>>) -> Result<(), String> {
            self.calls.push(Call::Execute(params));
            Ok(())
        }
    }

    #[test]
    fn test_cursor_closed_before_bind_and_execute() {
        let mut stmt = CursorGuard::new(FakeStatement::default());
        stmt.bind_value(1, 42, ParamType::Integer).unwrap();
        stmt.execute(None).unwrap();
        stmt.execute(Some(vec![7])).unwrap();

        assert_eq!(
            stmt.into_inner().calls,
            vec![
                Call::Close,
                Call::Bind(1, 42, ParamType::Integer),
                Call::Close,
                Call::Execute(None),
                Call::Close,
                Call::Execute(Some(vec![7])),
            ]
        );
    }

    #[test]
    fn test_boolean_bound_as_integer() {
        let mut stmt = CursorGuard::new(FakeStatement::default());
        stmt.bind_value(2, 1, ParamType::Boolean).unwrap();
        stmt.bind_value(3, 0, ParamType::String).unwrap();

        assert_eq!(stmt.inner().calls[1], Call::Bind(2, 1, ParamType::Integer));
        assert_eq!(stmt.inner().calls[3], Call::Bind(3, 0, ParamType::String));
    }

    #[test]
    fn test_close_failure_stops_execute() {
        let mut stmt = CursorGuard::new(FakeStatement {
            fail_close: true,
            ..FakeStatement::default()
        });

        assert_eq!(stmt.execute(None), Err("cursor busy".to_string()));
        assert_eq!(stmt.inner().calls, vec![Call::Close]);
    }
}
