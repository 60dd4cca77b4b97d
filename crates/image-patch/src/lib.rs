//! Partial-update requests for Glance v2 images.
//!
//! An image update is an ordered list of `add`, `replace` and `remove`
//! operations sent as a JSON array:
//!
//! ```
//! use glance_image_patch::{PatchSet, PatchSetBuilder};
//! use serde_json::json;
//!
//! let patch = PatchSetBuilder::new()
//!     .replace("/name", "cirros")
//!     .remove("/os_distro")
//!     .build()
//!     .unwrap();
//!
//! let wire = patch.to_json();
//! assert_eq!(
//!     wire,
//!     json!([
//!         {"op": "replace", "path": "/name", "value": "cirros"},
//!         {"op": "remove", "path": "/os_distro"},
//!     ])
//! );
//! assert_eq!(PatchSet::from_json(&wire).unwrap(), patch);
//! ```

mod builder;
mod error;
mod kind;
mod operation;
mod patch_set;

pub use builder::PatchSetBuilder;
pub use error::{MalformedOperation, PatchError};
pub use kind::{OperationKind, UnrecognizedKind};
pub use operation::Operation;
pub use patch_set::PatchSet;

/// Media type the image service expects for a patch request body.
pub const PATCH_CONTENT_TYPE: &str = "application/openstack-images-v2.1-json-patch";
