//! Format Module
//!
//! Turns property values into storage-native column values.
//!
//! ## Responsibilities
//! - Map native scalars onto typed columns by identity conversion
//! - Flatten dictionaries, sequences and structures into text columns
//! - Locale-sensitive rendering of numbers and dates (`FormatProvider`)
//!
//! ## Column Mapping
//! ```text
//! Scalar ─┬─ Null ............ Binary(None)
//!         ├─ Bytes ........... Binary(Some)
//!         ├─ Boolean ......... Boolean
//!         ├─ DateTimeOffset .. DateTimeOffset
//!         ├─ DateTime ........ DateTime
//!         ├─ Double .......... Double
//!         ├─ Guid ............ Guid
//!         ├─ Int32 / Int64 ... Int32 / Int64
//!         ├─ String .......... String
//!         └─ anything else ... String (default text)
//! Dictionary / Sequence / Structure ... String (canonical text)
//! ```

mod culture;
mod formatter;

pub use culture::{Culture, FormatProvider, MAX_FIXED_DECIMALS};
pub use formatter::{ColumnFormatter, PropertyFormatter};
