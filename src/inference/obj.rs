/// Class tags that carry no meaning as a declaration name.
const GENERIC_CLASSES: &[&str] = &["Object"];

/// The record name a sample's class tag provides, if any.
pub fn class_name(class: Option<&str>) -> Option<&str> {
    let class = class?.trim();
    if class.is_empty() || GENERIC_CLASSES.contains(&class) {
        return None;
    }
    Some(class)
}
