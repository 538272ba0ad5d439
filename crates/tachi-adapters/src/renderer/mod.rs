//! Template renderer adapters.

mod tera;

pub use self::tera::TeraRenderer;
