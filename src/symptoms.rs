//! Symptom checker stub
//!
//! Placeholder until a real diagnostic model exists: the answer does not
//! depend on what the user typed.

pub const STUB_DIAGNOSIS: &str = "Possible conditions: Cold, Flu, or Allergies.";

pub fn check(_symptoms: &str) -> &'static str {
    STUB_DIAGNOSIS
}
