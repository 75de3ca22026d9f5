//! Validation, aggregation and submit gating for the account forms.

pub mod engine;
pub mod field;
pub mod presenter;
pub mod preset;
pub mod server_errors;
pub mod state;
pub mod strength;
pub mod submission;
pub mod surface;
pub mod toggle;
pub mod validator;

pub use engine::{Dispatch, FormEngine, FormEvent};
pub use field::{Field, FieldId, FieldKind, FieldValue};
pub use presenter::{Presenter, View};
pub use preset::FormSpec;
pub use server_errors::ServerErrors;
pub use state::FormState;
pub use strength::{StrengthTier, score};
pub use submission::{Decision, SubmissionController, SubmissionPhase, TimerToken};
pub use surface::{Chrome, MemoryChrome, MemorySurface, Surface};
pub use toggle::{MobileMenu, PasswordVisibility, ScrollToTop};
pub use validator::{Rules, Verdict, validate};
