pub mod params;

pub use params::{to_params, Params, ParamsExt, ToParams};
