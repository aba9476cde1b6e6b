//! Библиотека чтения формата MEG160 `.sqd`
//!
//! Декодер бинарных записей биомагнитной (МЭГ) системы: таблица смещений,
//! основная информация, усилитель, параметры сбора, сведения о пациенте и
//! извлечение отдельного канала из перемежающихся отсчётов.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use sqd_core::SqdDocument;
//!
//! let doc = SqdDocument::open("R0874.sqd")?;
//! println!("{doc}");
//!
//! let chan0 = doc.extract_channel_raw(0)?;
//! let chan0_pt = doc.extract_channel_scaled(0)?;
//! assert_eq!(chan0.len(), chan0_pt.len());
//! # Ok::<(), sqd_core::error::SqdError>(())
//! ```

pub mod binary;
pub mod config;
pub mod conversion;
pub mod document;
pub mod extract;
pub mod format;
pub mod gain;
pub mod header;

#[cfg(test)]
mod testing;

pub use sqd_types as types;
pub use sqd_types::error;

pub use binary::*;
pub use config::*;
pub use conversion::*;
pub use document::*;
pub use extract::*;
pub use format::*;
pub use gain::*;
pub use header::*;
pub use sqd_types::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
