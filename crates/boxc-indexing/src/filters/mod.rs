//! Built-in document filters, in pipeline order.

pub mod access_control;
pub mod access_status;
pub mod content_status;
pub mod content_type;
pub mod datastream;
pub mod descriptive;
pub mod formats;
pub mod path;
pub mod resource_type;

pub use access_control::AccessControlFilter;
pub use access_status::AccessStatusFilter;
pub use content_status::ContentStatusFilter;
pub use content_type::ContentTypeFilter;
pub use datastream::DatastreamFilter;
pub use descriptive::DescriptiveFilter;
pub use path::PathFilter;
pub use resource_type::ResourceTypeFilter;
