//! Operation contract consumed by the pipeline core.
//!
//! Operations are external collaborators: polymorphic units that take a
//! carrier, perform an opaque transformation, and return a new carrier.
//! The core only defines the contract and the missing-context check; it
//! never schedules or orchestrates execution.

use crate::carrier::Carrier;
use crate::errors::ImgflowError;
use std::fmt::Debug;

/// Trait for pipeline operations.
///
/// An operation must not mutate its input carrier in place: it copies the
/// carrier, transforms the copy, and returns it. Context records it needs
/// from upstream are declared via [`required_contexts`] so hosts can
/// surface advisory diagnostics before or during execution.
///
/// [`required_contexts`]: Operation::required_contexts
pub trait Operation<P>: Send + Sync + Debug {
    /// Returns the name of the operation.
    fn name(&self) -> &str;

    /// Names of context records this operation expects from upstream.
    fn required_contexts(&self) -> Vec<String> {
        Vec::new()
    }

    /// Applies the operation, producing a new carrier.
    ///
    /// # Errors
    ///
    /// Returns `ImgflowError` when the transformation fails; absence of a
    /// declared context is not an error at this layer.
    fn apply(&self, carrier: &Carrier<P>) -> Result<Carrier<P>, ImgflowError>;

    /// Computes the missing subset of [`required_contexts`] and emits the
    /// advisory diagnostic for it.
    ///
    /// Returns the missing names; callers decide whether absence is fatal
    /// for their own logic.
    ///
    /// [`required_contexts`]: Operation::required_contexts
    fn check_required(&self, carrier: &Carrier<P>) -> Vec<String> {
        let required = self.required_contexts();
        let missing = carrier.get_missing_contexts(&required);
        carrier.log_missing_contexts(&missing, self.name());
        missing
    }
}

/// A closure-backed operation.
pub struct FnOperation<P, F>
where
    F: Fn(&Carrier<P>) -> Result<Carrier<P>, ImgflowError> + Send + Sync,
{
    name: String,
    required: Vec<String>,
    func: F,
    _marker: std::marker::PhantomData<fn(P)>,
}

impl<P, F> FnOperation<P, F>
where
    F: Fn(&Carrier<P>) -> Result<Carrier<P>, ImgflowError> + Send + Sync,
{
    /// Creates a new closure-backed operation.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            func,
            _marker: std::marker::PhantomData,
        }
    }

    /// Declares the context names this operation expects from upstream.
    #[must_use]
    pub fn with_required_contexts<S: Into<String>>(
        mut self,
        required: impl IntoIterator<Item = S>,
    ) -> Self {
        self.required = required.into_iter().map(Into::into).collect();
        self
    }
}

impl<P, F> Debug for FnOperation<P, F>
where
    F: Fn(&Carrier<P>) -> Result<Carrier<P>, ImgflowError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperation")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

impl<P, F> Operation<P> for FnOperation<P, F>
where
    F: Fn(&Carrier<P>) -> Result<Carrier<P>, ImgflowError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn required_contexts(&self) -> Vec<String> {
        self.required.clone()
    }

    fn apply(&self, carrier: &Carrier<P>) -> Result<Carrier<P>, ImgflowError> {
        (self.func)(carrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextRegistry;
    use crate::records::{register_builtin_contexts, ResolutionContext};
    use mockall::mock;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn test_carrier() -> Carrier<Vec<u8>> {
        let registry = ContextRegistry::new();
        register_builtin_contexts(&registry).unwrap();
        Carrier::new(vec![0_u8; 8], Arc::new(registry))
    }

    mock! {
        ImageOp {}

        impl Operation<Vec<u8>> for ImageOp {
            fn name(&self) -> &str;
            fn required_contexts(&self) -> Vec<String>;
            fn apply(&self, carrier: &Carrier<Vec<u8>>) -> Result<Carrier<Vec<u8>>, ImgflowError>;
        }
    }

    impl Debug for MockImageOp {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MockImageOp").finish_non_exhaustive()
        }
    }

    #[test]
    fn test_fn_operation_applies() {
        let op = FnOperation::new("decide_resolution", |carrier: &Carrier<Vec<u8>>| {
            let mut next = carrier.copy();
            next.add_context(ResolutionContext::from_dimensions(1920, 1080)?)?;
            Ok(next)
        });

        assert_eq!(op.name(), "decide_resolution");

        let input = test_carrier();
        let output = op.apply(&input).unwrap();

        assert!(output.has_context("resolution"));
        assert!(!input.has_context("resolution"));
    }

    #[test]
    fn test_fn_operation_required_contexts() {
        let op = FnOperation::new("resize", |carrier: &Carrier<Vec<u8>>| Ok(carrier.copy()))
            .with_required_contexts(["resolution", "resolution_decision"]);

        assert_eq!(
            op.required_contexts(),
            vec!["resolution", "resolution_decision"]
        );
    }

    #[test]
    fn test_check_required_reports_missing() {
        let op = FnOperation::new("resize", |carrier: &Carrier<Vec<u8>>| Ok(carrier.copy()))
            .with_required_contexts(["resolution"]);

        let mut carrier = test_carrier();
        let missing = op.check_required(&carrier);
        assert_eq!(missing, vec!["resolution"]);

        carrier
            .add_context(ResolutionContext::from_dimensions(1920, 1080).unwrap())
            .unwrap();
        assert!(op.check_required(&carrier).is_empty());
    }

    #[test]
    fn test_mocked_operation_contract() {
        let mut op = MockImageOp::new();
        op.expect_name().return_const("blur".to_string());
        op.expect_apply()
            .returning(|carrier| Ok(carrier.copy_with_payload(vec![1_u8])));

        let input = test_carrier();
        let output = op.apply(&input).unwrap();

        assert_eq!(output.payload(), &vec![1_u8]);
        assert_eq!(input.payload(), &vec![0_u8; 8]);
        assert_eq!(op.name(), "blur");
    }
}
