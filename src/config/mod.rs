mod r#impl;
mod structs;

pub use structs::*;

/// Route groups the `spada` binary knows how to mount.
pub const ALL_SERVICES: &[&str] = &[
    "users",
    "courses",
    "grading",
    "attendance",
    "admin",
    "announcements",
    "homeroom",
    "scheduling",
    "files",
];
