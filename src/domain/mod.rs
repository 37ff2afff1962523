pub mod record;

pub use record::{Dataset, FlightRecord, RouteTable};
