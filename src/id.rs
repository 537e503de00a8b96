//! Resource identifiers for the provisioning API.
//!
//! Each id is checked once, at construction or deserialization, to be a single URL path segment.
//! Service methods format ids straight into request paths without further escaping concerns.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! segment_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Resource kind named in validation errors.
			pub const KIND: &'static str = $kind;

			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				validate_segment(Self::KIND, &value)?;

				Ok(Self(value))
			}

			/// Returns the identifier text.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				self.as_str()
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.as_str()
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				self.as_str()
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl TryFrom<&str> for $name {
			type Error = IdentifierError;

			fn try_from(value: &str) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", Self::KIND, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (tenant, instance, snapshot, key, session).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (tenant, instance, snapshot, key, session).
		kind: &'static str,
	},
	/// The identifier contains a path separator or is a dot segment.
	#[error("{kind} identifier must be a single path segment.")]
	NotASegment {
		/// Kind of identifier (tenant, instance, snapshot, key, session).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (tenant, instance, snapshot, key, session).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

segment_id! { TenantId, "Identifier of a tenant.", "Tenant" }
segment_id! { InstanceId, "Identifier of a database instance.", "Instance" }
segment_id! { SnapshotId, "Identifier of an instance snapshot.", "Snapshot" }
segment_id! { KeyId, "Identifier of a customer-managed encryption key.", "Key" }
segment_id! { SessionId, "Identifier of an analytics session.", "Session" }

fn validate_segment(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.contains(['/', '\\']) || view == "." || view == ".." {
		return Err(IdentifierError::NotASegment { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn rejects_values_that_are_not_one_segment() {
		assert!(TenantId::new(" tenant-123").is_err(), "Leading whitespace must be rejected.");
		assert!(InstanceId::new("").is_err());
		assert_eq!(
			SnapshotId::new("a/b").expect_err("Slashes must be rejected."),
			IdentifierError::NotASegment { kind: "Snapshot" }
		);
		assert!(KeyId::new("..").is_err());

		let tenant = TenantId::new("tenant-123").expect("Tenant fixture should be valid.");

		assert_eq!(tenant.as_ref(), "tenant-123");
		assert_eq!(format!("{tenant:?}"), "Tenant(tenant-123)");
		assert_eq!(format!("tenants/{tenant}/instances"), "tenants/tenant-123/instances");
	}

	#[test]
	fn payload_ids_are_validated_on_decode() {
		let instance: InstanceId =
			serde_json::from_str("\"inst-42\"").expect("Instance should deserialize.");

		assert_eq!(instance.as_ref(), "inst-42");
		assert!(serde_json::from_str::<InstanceId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<SessionId>("\"a/b\"").is_err());
	}

	#[test]
	fn accepts_ids_up_to_the_length_cap() {
		TenantId::new("a".repeat(IDENTIFIER_MAX_LEN)).expect("Exact length should succeed.");

		assert!(TenantId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)).is_err());
	}

	#[test]
	fn ids_index_maps_by_str() {
		let map: HashMap<TenantId, u8> = HashMap::from_iter([(
			TenantId::new("tenant-123").expect("Tenant used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("tenant-123"), Some(&7));
	}
}
