//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod bank_account;
pub mod bill;
pub mod group;
pub mod user;

pub use bank_account::BankAccountRepository;
pub use bill::{BillError, BillRepository, CreateBillInput, PaymentReceipt};
pub use group::GroupRepository;
pub use user::UserRepository;
