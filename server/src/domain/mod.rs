//! Domain logic for the bus dashboard
//!
//! - `buses` - filter selections, filter catalogs and the render pass

pub mod buses;
