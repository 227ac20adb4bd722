/// Outcome of an account operation.
///
/// Expected business failures (bad input, missing rows, rejected approval codes)
/// are reported through `success == false` with a human-readable description
/// instead of an error. A failure caused by a rejected approval code keeps the
/// approval verification result in `approval` for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResult<T = ()> {
    pub success: bool,
    pub description: String,
    pub value: Option<T>,
    pub approval: Option<Box<ServiceResult>>,
}

impl<T> ServiceResult<T> {
    pub fn ok(description: impl Into<String>) -> Self {
        Self {
            success: true,
            description: description.into(),
            value: None,
            approval: None,
        }
    }

    pub fn ok_with(description: impl Into<String>, value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::ok(description)
        }
    }

    pub fn fail(description: impl Into<String>) -> Self {
        Self {
            success: false,
            description: description.into(),
            value: None,
            approval: None,
        }
    }

    pub fn fail_with_approval(description: impl Into<String>, approval: ServiceResult) -> Self {
        Self {
            approval: Some(Box::new(approval)),
            ..Self::fail(description)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
