//! D-Bus type signature to C type mapping
//!
//! C types keep the trailing space or `*` so that an identifier can be
//! appended directly (`"gint "` + `"arg_count"`).

use serde::Serialize;

/// Type mapping from a D-Bus signature to C parameter types
struct SignatureMapping {
    signature: &'static str,
    ctype_in: &'static str,
    ctype_out: &'static str,
}

const SIGNATURE_MAPPINGS: &[SignatureMapping] = &[
    SignatureMapping {
        signature: "b",
        ctype_in: "gboolean ",
        ctype_out: "gboolean *",
    },
    SignatureMapping {
        signature: "y",
        ctype_in: "guchar ",
        ctype_out: "guchar *",
    },
    SignatureMapping {
        signature: "n",
        ctype_in: "gint16 ",
        ctype_out: "gint16 *",
    },
    SignatureMapping {
        signature: "q",
        ctype_in: "guint16 ",
        ctype_out: "guint16 *",
    },
    SignatureMapping {
        signature: "i",
        ctype_in: "gint ",
        ctype_out: "gint *",
    },
    SignatureMapping {
        signature: "u",
        ctype_in: "guint ",
        ctype_out: "guint *",
    },
    SignatureMapping {
        signature: "x",
        ctype_in: "gint64 ",
        ctype_out: "gint64 *",
    },
    SignatureMapping {
        signature: "t",
        ctype_in: "guint64 ",
        ctype_out: "guint64 *",
    },
    SignatureMapping {
        signature: "d",
        ctype_in: "gdouble ",
        ctype_out: "gdouble *",
    },
    SignatureMapping {
        signature: "h",
        ctype_in: "gint ",
        ctype_out: "gint *",
    },
    SignatureMapping {
        signature: "s",
        ctype_in: "const gchar *",
        ctype_out: "gchar **",
    },
    SignatureMapping {
        signature: "o",
        ctype_in: "const gchar *",
        ctype_out: "gchar **",
    },
    SignatureMapping {
        signature: "g",
        ctype_in: "const gchar *",
        ctype_out: "gchar **",
    },
    SignatureMapping {
        signature: "ay",
        ctype_in: "const gchar *",
        ctype_out: "gchar **",
    },
    SignatureMapping {
        signature: "as",
        ctype_in: "const gchar *const *",
        ctype_out: "gchar ***",
    },
    SignatureMapping {
        signature: "ao",
        ctype_in: "const gchar *const *",
        ctype_out: "gchar ***",
    },
    SignatureMapping {
        signature: "aay",
        ctype_in: "const gchar *const *",
        ctype_out: "gchar ***",
    },
];

const GVARIANT_IN: &str = "GVariant *";
const GVARIANT_OUT: &str = "GVariant **";

/// C parameter types derived from a D-Bus signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CType {
    /// Type used when the value is passed in
    pub ctype_in: String,
    /// Type used when the value is returned through an out parameter
    pub ctype_out: String,
    /// Whether the value is passed as a boxed `GVariant`
    pub gvariant: bool,
}

impl CType {
    /// Map a signature to C types.
    ///
    /// Signatures without a dedicated mapping, and any signature when
    /// `force_gvariant` is set, are passed as `GVariant`.
    pub fn from_signature(signature: &str, force_gvariant: bool) -> Self {
        let mapping = if force_gvariant {
            None
        } else {
            SIGNATURE_MAPPINGS.iter().find(|m| m.signature == signature)
        };

        match mapping {
            Some(m) => Self {
                ctype_in: m.ctype_in.to_string(),
                ctype_out: m.ctype_out.to_string(),
                gvariant: false,
            },
            None => Self {
                ctype_in: GVARIANT_IN.to_string(),
                ctype_out: GVARIANT_OUT.to_string(),
                gvariant: true,
            },
        }
    }
}
