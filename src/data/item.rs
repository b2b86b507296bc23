//! Catalog Item Module
//! One bracelet record and its status classification.

/// Status labels counted as "in service". The second is the sheet's own label.
pub const IN_SERVICE_LABELS: [&str; 2] = ["in service", "服役中"];
/// Status labels counted as "disassembled".
pub const DISASSEMBLED_LABELS: [&str; 2] = ["disassembled", "已拆解"];

/// Classified status of a bracelet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    InService,
    Disassembled,
    Other,
}

impl StatusKind {
    /// Classify a raw status cell.
    pub fn classify(raw: &str) -> Self {
        let label = raw.trim();
        let matches = |labels: &[&str]| labels.iter().any(|l| l.eq_ignore_ascii_case(label));

        if matches(&IN_SERVICE_LABELS) {
            StatusKind::InService
        } else if matches(&DISASSEMBLED_LABELS) {
            StatusKind::Disassembled
        } else {
            StatusKind::Other
        }
    }
}

/// A single bracelet in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub main_crystal: String,
    pub color: String,
    /// Wrist size in millimetres. Absent when the cell is empty or not a number.
    pub size_mm: Option<f64>,
    pub bracelet_type: String,
    pub status: String,
    pub image_url: Option<String>,
    pub note: Option<String>,
}

impl Item {
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::classify(&self.status)
    }

    /// Whether the item takes part in the daily pairing.
    pub fn is_active(&self) -> bool {
        self.status_kind() == StatusKind::InService
    }

    /// Photo URL, only when it looks like a web link.
    pub fn photo_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| url.starts_with("http"))
    }

    /// Size formatted for display, e.g. `15.5mm`.
    pub fn size_label(&self) -> String {
        match self.size_mm {
            Some(size) => format!("{size}mm"),
            None => "?mm".to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, color: &str, status: &str) -> Item {
    Item {
        id: id.to_string(),
        name: format!("Bracelet {id}"),
        main_crystal: "Amethyst".to_string(),
        color: color.to_string(),
        size_mm: Some(15.0),
        bracelet_type: "Single loop".to_string(),
        status: status.to_string(),
        image_url: None,
        note: None,
    }
}
