// Guest selection service
// Pure set operations over participant ids plus the invite typeahead

use crate::models::user::User;

/// Add a guest; adding an already-present id is a no-op.
pub fn add_guest(selected: &mut Vec<i64>, user_id: i64) {
    if !selected.contains(&user_id) {
        selected.push(user_id);
    }
}

/// Remove a guest; removing an absent id is a no-op.
pub fn remove_guest(selected: &mut Vec<i64>, user_id: i64) {
    selected.retain(|&id| id != user_id);
}

/// Typeahead candidates for the invite field: case-insensitive prefix match
/// on the display name, excluding users already selected. A blank query
/// yields nothing.
pub fn guest_suggestions<'a>(
    users: &'a [User],
    selected: &[i64],
    query: &str,
) -> Vec<&'a User> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();

    users
        .iter()
        .filter(|user| !user.user_name.is_empty())
        .filter(|user| !selected.contains(&user.id))
        .filter(|user| user.user_name.to_lowercase().starts_with(&query))
        .collect()
}

/// Display name for a selected guest, falling back to the raw id when the
/// user record is unknown.
pub fn guest_display_name(users: &[User], user_id: i64) -> String {
    users
        .iter()
        .find(|user| user.id == user_id)
        .filter(|user| !user.user_name.is_empty())
        .map(|user| user.user_name.clone())
        .unwrap_or_else(|| user_id.to_string())
}
