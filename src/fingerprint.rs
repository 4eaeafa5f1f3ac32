//! Content fingerprints for resource identity.
//!
//! A fingerprint is a deterministic, content-only 64-bit hash of a resource's
//! types, property document, and outgoing links. Incoming links, the label,
//! and any provisional id are ignored.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::resource::{Resource, ResourceId};

/// Computes resource identities.
pub trait Fingerprinter: Send + Sync + fmt::Debug {
    /// Returns the content fingerprint of a resource.
    fn fingerprint(&self, resource: &Resource) -> ResourceId;

    /// Returns an identity derived from a bare string key.
    ///
    /// Used for placeholders whose content is not known yet.
    fn fingerprint_key(&self, key: &str) -> ResourceId;
}

/// SHA-256 fingerprinter.
///
/// Hashes a length-prefixed canonical encoding: sorted types, property keys in
/// sorted order with their values in stored order, then outgoing links sorted
/// by predicate and target. The first eight digest bytes form the id.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

const TAG_TYPE: u8 = 0x01;
const TAG_PROPERTY: u8 = 0x02;
const TAG_VALUE: u8 = 0x03;
const TAG_LINK: u8 = 0x04;
const TAG_KEY: u8 = 0x05;

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, resource: &Resource) -> ResourceId {
        let mut hasher = Sha256::new();

        for type_tag in &resource.types {
            write_str(&mut hasher, TAG_TYPE, type_tag);
        }

        let mut keys: Vec<&String> = resource.doc.keys().collect();
        keys.sort();
        for key in keys {
            write_str(&mut hasher, TAG_PROPERTY, key);
            for value in &resource.doc[key.as_str()] {
                write_str(&mut hasher, TAG_VALUE, value);
            }
        }

        let mut links: Vec<_> = resource.outgoing.iter().collect();
        links.sort();
        for link in links {
            write_str(&mut hasher, TAG_LINK, &link.predicate);
            hasher.update(link.node.value().to_be_bytes());
        }

        finish(hasher)
    }

    fn fingerprint_key(&self, key: &str) -> ResourceId {
        let mut hasher = Sha256::new();
        write_str(&mut hasher, TAG_KEY, key);
        finish(hasher)
    }
}

fn write_str(hasher: &mut Sha256, tag: u8, value: &str) {
    hasher.update([tag]);
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

fn finish(hasher: Sha256) -> ResourceId {
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    ResourceId(u64::from_be_bytes(bytes))
}
