use caf_hash::hex::hex_to_string;
use caf_hash::hasher::Hasher;
use caf_hash::{HashAlgorithm, ObjectHash};
use proptest::prelude::*;

proptest! {
    #[test]
    fn digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let a = Hasher::digest(HashAlgorithm::Sha1, &data).unwrap();
        let b = Hasher::digest(HashAlgorithm::Sha1, &data).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn split_point_does_not_matter(
        data in proptest::collection::vec(any::<u8>(), 1..512),
        split in 0usize..512,
    ) {
        let split = split % data.len();
        let mut hasher = Hasher::new(HashAlgorithm::Sha256);
        hasher.update(&data[..split]);
        hasher.update(&data[split..]);
        prop_assert_eq!(
            hasher.finalize().unwrap(),
            Hasher::digest(HashAlgorithm::Sha256, &data).unwrap()
        );
    }

    #[test]
    fn parse_accepts_any_case_of_valid_digests(bytes in proptest::array::uniform20(any::<u8>())) {
        let hex = hex_to_string(&bytes);
        let parsed = ObjectHash::parse(&hex.to_ascii_uppercase()).unwrap();
        prop_assert_eq!(parsed.as_str(), hex.as_str());
        prop_assert_eq!(parsed, ObjectHash::from_digest_bytes(&bytes));
    }
}
