// Device error code table.

/// The code the camera returns when the session token is missing,
/// malformed, or no longer valid. The executor treats this — and only
/// this — as recoverable.
pub const INVALID_STOK: i64 = -40401;

/// Human-readable message for a device error code.
///
/// Pure lookup; undocumented codes fall back to their stringified value.
pub fn describe(code: i64) -> String {
    let message = match code {
        INVALID_STOK => "Invalid stok value",
        -64324 => "Privacy mode is ON, not able to execute",
        -64302 => "Preset ID not found",
        -64321 => "Preset ID was deleted so no longer exists",
        -40106 => "Parameter to get/do does not exist",
        -40105 => "Method does not exist",
        -40101 => "Parameter to set does not exist",
        other => return other.to_string(),
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_fixed_messages() {
        assert_eq!(describe(-64302), "Preset ID not found");
        assert_eq!(describe(-40401), "Invalid stok value");
        assert_eq!(describe(-64324), "Privacy mode is ON, not able to execute");
        assert_eq!(describe(-40105), "Method does not exist");
    }

    #[test]
    fn unknown_codes_stringify() {
        assert_eq!(describe(-99999), "-99999");
        assert_eq!(describe(42), "42");
    }
}
