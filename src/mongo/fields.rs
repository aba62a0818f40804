use std::collections::HashSet;

use mongodb::bson::Document;

const ID_FIELD: &str = "_id";

/// Collects the top-level keys of `documents` in first-seen order, without duplicates.
///
/// `_id` is left out: the server assigns it, so it never becomes a form row.
pub fn field_names_from_documents(documents: &[Document]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for document in documents {
        for key in document.keys() {
            if key == ID_FIELD {
                continue;
            }
            if seen.insert(key.as_str()) {
                names.push(key.clone());
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::field_names_from_documents;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn keeps_first_seen_order_across_documents() {
        let documents = vec![
            doc! { "_id": ObjectId::new(), "name": "bolt", "size": 4 },
            doc! { "_id": ObjectId::new(), "price": 0.25, "name": "nut" },
            doc! { "size": 6, "stock": 120 },
        ];

        assert_eq!(field_names_from_documents(&documents), vec!["name", "size", "price", "stock"]);
    }

    #[test]
    fn id_only_documents_yield_no_fields() {
        let documents = vec![doc! { "_id": 1 }, doc! { "_id": 2 }];
        assert!(field_names_from_documents(&documents).is_empty());
    }

    #[test]
    fn nested_keys_are_not_flattened() {
        let documents = vec![doc! { "address": { "city": "Oslo", "zip": "0150" } }];
        assert_eq!(field_names_from_documents(&documents), vec!["address"]);
    }
}
