mod permissions;

pub use permissions::PermissionsCommand;
