//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the extension points the allocation core talks to. Adapters
//! implement them for real or offline collaborators.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Strategy + Risk        ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │  Pool    │           │   Signal    │              │ Notifier  │
//! │  Data    │           │  Executor   │              │  Adapter  │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```

pub mod outbound;
