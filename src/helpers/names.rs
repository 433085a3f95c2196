use model::entities::account::Role;

/// The resolved name fields for an account and its profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub first_name: String,
    pub last_name: String,
    /// Display name stored on the account row.
    pub display_name: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Derive first/last/display name from whatever combination of fields the
/// request carried.
///
/// A combined `name` is split on whitespace: first token becomes the first
/// name, the remaining tokens joined by a space become the last name. Split
/// fields are joined with a single space to form the display name. When
/// nothing usable is present, a role-based placeholder ("Student Account",
/// "Teacher Account") is substituted so provisioning never fails solely for
/// a missing name.
pub fn resolve_name(
    role: Role,
    name: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> ResolvedName {
    let mut first = non_blank(first_name).map(str::to_string);
    let mut last = non_blank(last_name).map(str::to_string);

    if first.is_none() && last.is_none() {
        if let Some(combined) = non_blank(name) {
            let mut tokens = combined.split_whitespace();
            first = tokens.next().map(str::to_string);
            let rest = tokens.collect::<Vec<_>>().join(" ");
            if !rest.is_empty() {
                last = Some(rest);
            }
        }
    }

    if first.is_none() && last.is_none() {
        // Placeholder fallback keeps account creation from failing on a
        // missing name. Stricter rejection is an open product question.
        let placeholder = role.placeholder_name();
        let mut tokens = placeholder.split_whitespace();
        return ResolvedName {
            first_name: tokens.next().unwrap_or_default().to_string(),
            last_name: tokens.collect::<Vec<_>>().join(" "),
            display_name: placeholder.to_string(),
        };
    }

    let first_name = first.unwrap_or_default();
    let last_name = last.unwrap_or_default();
    let display_name = [first_name.as_str(), last_name.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    ResolvedName {
        first_name,
        last_name,
        display_name,
    }
}
