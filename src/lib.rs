//! Invoice generation for metal-trade shipments: collects invoice fields,
//! computes totals (with optional LME-derived rates and USD→SAR conversion),
//! renders an HTML template and converts it to PDF.

pub mod bankfmt;
pub mod config;
pub mod error;
pub mod model;
pub mod pdf;
pub mod render;
pub mod sheet;
pub mod totals;
pub mod words;
