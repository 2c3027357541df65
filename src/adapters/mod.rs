pub mod generators;
pub mod passthrough;
pub mod route_registrar;
pub mod schema_mapper;
pub mod value_generator;

pub use route_registrar::MockRouter;
pub use value_generator::ValueGenerator;
