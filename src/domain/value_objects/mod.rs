mod container_name;
mod object_path;

pub use container_name::ContainerName;
pub use object_path::ObjectPath;
