//! Field defaults for the project model.
//!
//! Every default that parsing may apply lives here, once. The serde
//! `default = "..."` attributes on the entities point at these functions, so
//! a parsed model never carries an "absent" field downstream.

pub const PROJECT_NAME: &str = "";
pub const STRATEGY: &str = "basic";

pub const RESOURCE_GROUP: &str = "";
pub const REGISTRY: &str = "";
pub const LOCATION: &str = "eastus";

pub const SERVICE_NAME: &str = "";
pub const DOCKERFILE: &str = "Dockerfile";
pub const PORT: i64 = 8000;
pub const EXTERNAL: bool = true;
pub const CPU: f64 = 0.25;
pub const MEMORY: &str = "0.5Gi";
pub const MIN_REPLICAS: i64 = 1;
pub const MAX_REPLICAS: i64 = 10;
pub const CONTEXT: &str = ".";

pub fn project_name() -> String {
    PROJECT_NAME.into()
}

pub fn strategy() -> String {
    STRATEGY.into()
}

pub fn resource_group() -> String {
    RESOURCE_GROUP.into()
}

pub fn registry() -> String {
    REGISTRY.into()
}

pub fn location() -> String {
    LOCATION.into()
}

pub fn service_name() -> String {
    SERVICE_NAME.into()
}

pub fn dockerfile() -> String {
    DOCKERFILE.into()
}

pub fn port() -> i64 {
    PORT
}

pub fn external() -> bool {
    EXTERNAL
}

pub fn cpu() -> f64 {
    CPU
}

pub fn memory() -> String {
    MEMORY.into()
}

pub fn min_replicas() -> i64 {
    MIN_REPLICAS
}

pub fn max_replicas() -> i64 {
    MAX_REPLICAS
}

pub fn context() -> String {
    CONTEXT.into()
}
