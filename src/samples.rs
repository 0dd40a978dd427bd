//! Canned records served when the live API answers with anything but 200.

use serde_json::{json, Value};

use crate::query_parser::DataType;

pub fn sample_records(data_type: DataType) -> Vec<Value> {
    let records = match data_type {
        DataType::Meps => sample_meps(),
        DataType::Meetings => sample_meetings(),
        DataType::AdoptedTexts => sample_adopted_texts(),
        DataType::Documents => sample_documents(),
        DataType::Questions => sample_questions(),
        DataType::PlenarySessions => sample_plenary_sessions(),
    };

    match records {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

fn sample_meps() -> Value {
    json!([
        {"identifier": "124750", "familyName": "Bellamy", "givenName": "François-Xavier", "hasCountryOfRepresentation": {"@id": "FR"}},
        {"identifier": "197717", "familyName": "Glucksmann", "givenName": "Raphaël", "hasCountryOfRepresentation": {"@id": "FR"}},
        {"identifier": "257076", "familyName": "Aubry", "givenName": "Manon", "hasCountryOfRepresentation": {"@id": "FR"}},
        {"identifier": "197123", "familyName": "Le Pen", "givenName": "Marine", "hasCountryOfRepresentation": {"@id": "FR"}},
        {"identifier": "28266", "familyName": "Lagarde", "givenName": "Patricia", "hasCountryOfRepresentation": {"@id": "FR"}},
        {"identifier": "96834", "familyName": "Mueller", "givenName": "Hans", "hasCountryOfRepresentation": {"@id": "DE"}},
        {"identifier": "98765", "familyName": "Schmidt", "givenName": "Klaus", "hasCountryOfRepresentation": {"@id": "DE"}},
        {"identifier": "87654", "familyName": "Rossi", "givenName": "Marco", "hasCountryOfRepresentation": {"@id": "IT"}},
        {"identifier": "76543", "familyName": "García", "givenName": "María", "hasCountryOfRepresentation": {"@id": "ES"}},
        {"identifier": "65432", "familyName": "Kowalski", "givenName": "Jan", "hasCountryOfRepresentation": {"@id": "PL"}}
    ])
}

fn sample_meetings() -> Value {
    json!([
        {"identifier": "MTG-PL-2024-01-15", "title": "Plenary sitting - Strasbourg", "startDate": "2024-01-15", "type": "PLENARY_SITTING"},
        {"identifier": "MTG-ENVI-2024-01-24", "title": "ENVI committee meeting", "startDate": "2024-01-24", "type": "COMMITTEE_MEETING"},
        {"identifier": "MTG-AGRI-2024-02-01", "title": "AGRI committee meeting", "startDate": "2024-02-01", "type": "COMMITTEE_MEETING"},
        {"identifier": "MTG-PL-2024-02-05", "title": "Plenary sitting - Strasbourg", "startDate": "2024-02-05", "type": "PLENARY_SITTING"}
    ])
}

fn sample_adopted_texts() -> Value {
    json!([
        {"identifier": "TA-9-2024-0012", "title": "Resolution on the situation in the Middle East", "dateAdopted": "2024-01-18", "label": "P9_TA(2024)0012"},
        {"identifier": "TA-9-2024-0029", "title": "Artificial Intelligence Act", "dateAdopted": "2024-03-13", "label": "P9_TA(2024)0138"},
        {"identifier": "TA-9-2024-0041", "title": "European Media Freedom Act", "dateAdopted": "2024-03-13", "label": "P9_TA(2024)0137"}
    ])
}

fn sample_documents() -> Value {
    json!([
        {"identifier": "A9-0188/2023", "title": "Report on the proposal for a regulation on nature restoration", "date": "2023-06-07", "type": "REPORT"},
        {"identifier": "B9-0052/2024", "title": "Motion for a resolution on the humanitarian situation in Gaza", "date": "2024-01-16", "type": "MOTION_FOR_RESOLUTION"},
        {"identifier": "A9-0031/2024", "title": "Report on the implementation of the common foreign and security policy", "date": "2024-02-06", "type": "REPORT"}
    ])
}

fn sample_questions() -> Value {
    json!([
        {"identifier": "E-000123/2024", "title": "Support for small-scale fisheries in the Baltic", "date": "2024-01-12", "author": "Jan Kowalski"},
        {"identifier": "P-000456/2024", "title": "Energy prices and household affordability", "date": "2024-02-02", "author": "Marco Rossi"},
        {"identifier": "O-000007/2024", "title": "Implementation of the Digital Services Act", "date": "2024-02-20", "author": "Manon Aubry"}
    ])
}

fn sample_plenary_sessions() -> Value {
    json!([
        {"identifier": "PLENARY-2024-01-15", "title": "January I session", "startDate": "2024-01-15", "type": "PLENARY_SESSION"},
        {"identifier": "PLENARY-2024-02-05", "title": "February session", "startDate": "2024-02-05", "type": "PLENARY_SESSION"},
        {"identifier": "PLENARY-2024-02-26", "title": "February II session (Brussels)", "startDate": "2024-02-26", "type": "PLENARY_SESSION"}
    ])
}
