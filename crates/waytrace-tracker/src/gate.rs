//! Location-permission gating.

use async_trait::async_trait;

use waytrace_core::PermissionDenied;

/// Checks and requests location-access authorization.
///
/// Implementations may prompt the user through the host platform. The gate
/// fails closed: any error while acquiring authorization is a denial.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Ensure location access is authorized, requesting it if needed.
    async fn ensure_authorized(&self) -> Result<(), PermissionDenied>;
}

/// Fixed-outcome gate for demos and tests.
#[derive(Debug, Clone)]
pub struct StaticGate {
    denial: Option<String>,
}

impl StaticGate {
    pub fn granted() -> Self {
        Self { denial: None }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            denial: Some(reason.into()),
        }
    }
}

#[async_trait]
impl PermissionGate for StaticGate {
    async fn ensure_authorized(&self) -> Result<(), PermissionDenied> {
        match &self.denial {
            None => Ok(()),
            Some(reason) => Err(PermissionDenied::new(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_gate_outcomes() {
        assert!(StaticGate::granted().ensure_authorized().await.is_ok());

        let denied = StaticGate::denied("user refused")
            .ensure_authorized()
            .await
            .unwrap_err();
        assert_eq!(denied.reason, "user refused");
    }
}
