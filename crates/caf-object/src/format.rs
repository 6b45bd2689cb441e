use caf_hash::{HashAlgorithm, HashError, ObjectHash};
use serde::{Deserialize, Serialize};

use crate::encode::Encoding;
use crate::hash::{hash_object, Hashable};

/// How a store derives object identities.
///
/// Deserializes from a table such as:
///
/// ```toml
/// algorithm = "sha256"
/// encoding = "length-prefixed"
/// ```
///
/// Missing keys fall back to SHA-1 with the concatenated layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ObjectFormat {
    pub algorithm: HashAlgorithm,
    pub encoding: Encoding,
}

impl ObjectFormat {
    pub fn new(algorithm: HashAlgorithm, encoding: Encoding) -> Self {
        Self {
            algorithm,
            encoding,
        }
    }

    /// Hash an object with this format's algorithm and encoding.
    pub fn hash<T: Hashable + ?Sized>(&self, object: &T) -> Result<ObjectHash, HashError> {
        hash_object(object, self.encoding, &self.algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, TreeRecord};

    #[test]
    fn default_format() {
        let format = ObjectFormat::default();
        assert_eq!(format.algorithm, HashAlgorithm::Sha1);
        assert_eq!(format.encoding, Encoding::Concatenated);
    }

    #[test]
    fn hash_uses_configured_algorithm() {
        let tree = Tree::from_records([TreeRecord::blob("a", ObjectHash::new("1"))]);
        let sha1 = ObjectFormat::default().hash(&tree).unwrap();
        let sha256 = ObjectFormat::new(HashAlgorithm::Sha256, Encoding::Concatenated)
            .hash(&tree)
            .unwrap();
        assert_eq!(sha1.len(), 40);
        assert_eq!(sha256.len(), 64);
    }

    #[test]
    fn encoding_changes_identity() {
        let tree = Tree::from_records([TreeRecord::blob("a", ObjectHash::new("1"))]);
        let concatenated = ObjectFormat::new(HashAlgorithm::Sha1, Encoding::Concatenated);
        let prefixed = ObjectFormat::new(HashAlgorithm::Sha1, Encoding::LengthPrefixed);
        assert_ne!(
            concatenated.hash(&tree).unwrap(),
            prefixed.hash(&tree).unwrap()
        );
    }

    #[test]
    fn deserialize_from_toml() {
        let format: ObjectFormat =
            toml::from_str("algorithm = \"sha256\"\nencoding = \"length-prefixed\"\n").unwrap();
        assert_eq!(
            format,
            ObjectFormat::new(HashAlgorithm::Sha256, Encoding::LengthPrefixed)
        );
    }

    #[test]
    fn missing_keys_use_defaults() {
        let format: ObjectFormat = toml::from_str("encoding = \"concatenated\"").unwrap();
        assert_eq!(format, ObjectFormat::default());
        let empty: ObjectFormat = toml::from_str("").unwrap();
        assert_eq!(empty, ObjectFormat::default());
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(toml::from_str::<ObjectFormat>("algorithm = \"md5\"").is_err());
        assert!(toml::from_str::<ObjectFormat>("compression = true").is_err());
    }
}
