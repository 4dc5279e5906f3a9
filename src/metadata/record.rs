// src/metadata/record.rs
use crate::types::MetaValue;

/// Destination for decoded header metadata
///
/// Implementations must overwrite on duplicate keys (newest value wins).
pub trait MetadataSink {
    fn put(&mut self, key: String, value: MetaValue);
}

impl<S: MetadataSink + ?Sized> MetadataSink for &mut S {
    fn put(&mut self, key: String, value: MetaValue) {
        (**self).put(key, value)
    }
}

/// A fixed-layout record whose fields are published under one namespace
///
/// Each record lists its named fields once in [`fields`](Self::fields);
/// [`publish`](Self::publish) turns them into `"{NAMESPACE}.{name}"` keys.
pub trait MetadataRecord {
    const NAMESPACE: &'static str;

    fn fields(&self) -> Vec<(&'static str, MetaValue)>;

    fn publish<S: MetadataSink + ?Sized>(&self, sink: &mut S) {
        for (name, value) in self.fields() {
            sink.put(format!("{}.{}", Self::NAMESPACE, name), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetaTable;

    struct Pair {
        a: i16,
        b: f32,
    }

    impl MetadataRecord for Pair {
        const NAMESPACE: &'static str = "Pair";

        fn fields(&self) -> Vec<(&'static str, MetaValue)> {
            vec![("a", self.a.into()), ("b", self.b.into())]
        }
    }

    #[test]
    fn test_publish_prefixes_keys() {
        let mut table = MetaTable::new();
        Pair { a: 3, b: 0.5 }.publish(&mut table);

        assert_eq!(table.get("Pair.a"), Some(&MetaValue::Short(3)));
        assert_eq!(table.get("Pair.b"), Some(&MetaValue::Float(0.5)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_publish_through_dyn_sink() {
        let mut table = MetaTable::new();
        {
            let sink: &mut dyn MetadataSink = &mut table;
            Pair { a: 1, b: 2.0 }.publish(sink);
        }
        assert!(table.contains_key("Pair.a"));
    }
}
