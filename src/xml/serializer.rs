//! Contact record to XML bytes.

use super::{CONTACT_TAG, ROOT_TAG, XML_DECLARATION};
use crate::models::{ContactField, ContactRecord};
use quick_xml::escape::escape;

/// Serialize one record as a complete contacts document.
///
/// Output is deterministic: equal records give byte-identical documents.
/// The record is not re-validated.
pub fn serialize_contact(record: &ContactRecord) -> Vec<u8> {
    serialize_contacts(std::slice::from_ref(record))
}

/// Serialize several records, in order, under a single root element.
pub fn serialize_contacts(records: &[ContactRecord]) -> Vec<u8> {
    let mut xml = String::with_capacity(XML_DECLARATION.len() + 160 * records.len());
    xml.push_str(XML_DECLARATION);
    open(&mut xml, ROOT_TAG);
    for record in records {
        open(&mut xml, CONTACT_TAG);
        for field in ContactField::ALL {
            open(&mut xml, field.tag());
            xml.push_str(&escape(record.value(field)));
            close(&mut xml, field.tag());
        }
        close(&mut xml, CONTACT_TAG);
    }
    close(&mut xml, ROOT_TAG);
    xml.into_bytes()
}

fn open(xml: &mut String, tag: &str) {
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
}

fn close(xml: &mut String, tag: &str) {
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}
