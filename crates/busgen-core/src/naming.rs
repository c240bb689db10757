//! Naming convention utilities for code generation.
//!
//! D-Bus names are CamelCase with dot-separated components; generated C
//! uses snake_case functions and CamelCase types.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `CamelCase` | [`camel_case_to_uscore`] | `camel_case` |
//! | `dot.separated` | [`strip_dots`] | `dotSeparated` |
//! | `snake_case` | [`to_hyphen`] | `snake-case` |

/// Convert CamelCase to snake_case.
///
/// An underscore is inserted before every uppercase letter that follows a
/// non-uppercase character, so runs of capitals stay together.
///
/// # Examples
///
/// ```
/// use busgen_core::naming::camel_case_to_uscore;
///
/// assert_eq!(camel_case_to_uscore("GetAll"), "get_all");
/// assert_eq!(camel_case_to_uscore("DBusProxy"), "dbus_proxy");
/// assert_eq!(camel_case_to_uscore("already"), "already");
/// ```
pub fn camel_case_to_uscore(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            prev_was_lower = false;
        } else {
            prev_was_lower = true;
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Remove dots, uppercasing the character after each one.
///
/// # Examples
///
/// ```
/// use busgen_core::naming::strip_dots;
///
/// assert_eq!(strip_dots("Example.Frobber"), "ExampleFrobber");
/// assert_eq!(strip_dots("org.gtk.GDBus"), "orgGtkGDBus");
/// ```
pub fn strip_dots(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut force_upper = false;

    for c in s.chars() {
        if c == '.' {
            force_upper = true;
        } else if force_upper {
            result.extend(c.to_uppercase());
            force_upper = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Whether a name is already written in underscore form (`my_app`, not `MyApp`).
///
/// A leading underscore does not count.
pub fn is_ugly_case(s: &str) -> bool {
    s.find('_').is_some_and(|pos| pos > 0)
}

/// Replace underscores with hyphens.
pub fn to_hyphen(s: &str) -> String {
    s.replace('_', "-")
}
