//! Which set of lane primitives the kernels run on.
//!
//! The default is the widest one the CPU has. Setting `DEPTHWISE_BACKEND`
//! to `scalar`, `sse`, `neon` or `auto` overrides it for the process, which is
//! handy for comparing paths without recompiling.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{debug, warn};

use crate::error::UnknownBackend;

/// Environment variable read by [`Backend::from_env`].
pub const BACKEND_ENV: &str = "DEPTHWISE_BACKEND";

static ACTIVE: OnceLock<Backend> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Portable `[f32; 4]` lanes.
    Scalar,
    /// SSE2 on x86_64.
    Sse,
    /// NEON on aarch64.
    Neon,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Self::Scalar, Self::Sse, Self::Neon];

    /// Picks the fastest backend for this CPU (NEON > SSE > scalar).
    pub fn detect() -> Self {
        if cfg!(target_arch = "aarch64") {
            return Self::Neon;
        }

        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("sse2") {
                return Self::Sse;
            }
        }

        Self::Scalar
    }

    /// [`detect`](Self::detect), unless `DEPTHWISE_BACKEND` names another
    /// backend that this CPU can run.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_ENV) {
            Ok(value) => Self::from_setting(&value),
            Err(_) => Self::detect(),
        }
    }

    fn from_setting(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("auto") {
            return Self::detect();
        }
        match value.parse::<Backend>() {
            Ok(backend) if backend.is_available() => backend,
            Ok(backend) => {
                warn!("{BACKEND_ENV}={value}: {backend} is not available on this CPU, using auto-detect");
                Self::detect()
            }
            Err(e) => {
                warn!("{BACKEND_ENV}={value}: {e}, using auto-detect");
                Self::detect()
            }
        }
    }

    /// The backend the unqualified entry points use. Chosen once per process.
    pub fn active() -> Self {
        *ACTIVE.get_or_init(|| {
            let backend = Self::from_env();
            debug!("depthwise conv backend: {backend}");
            backend
        })
    }

    pub fn is_available(self) -> bool {
        match self {
            Self::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            Self::Sse => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "aarch64")]
            Self::Neon => true,
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse => "sse",
            Self::Neon => "neon",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBackend(s.to_string()))
    }
}
