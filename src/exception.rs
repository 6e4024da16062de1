use strum::{FromRepr, IntoStaticStr};

/// Fallback for exception codes the table doesn't know about.
pub const UNKNOWN_EXCEPTION: &str = "UNKNOWN";

/// `SIMCONNECT_EXCEPTION`, in SDK order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum SimException {
    None = 0,
    Error,
    SizeMismatch,
    UnrecognizedId,
    Unopened,
    VersionMismatch,
    TooManyGroups,
    NameUnrecognized,
    TooManyEventNames,
    EventIdDuplicate,
    TooManyMaps,
    TooManyObjects,
    TooManyRequests,
    WeatherInvalidPort,
    WeatherInvalidMetar,
    WeatherUnableToGetObservation,
    WeatherUnableToCreateStation,
    WeatherUnableToRemoveStation,
    InvalidDataType,
    InvalidDataSize,
    DataError,
    InvalidArray,
    CreateObjectFailed,
    LoadFlightplanFailed,
    OperationInvalidForObjectType,
    IllegalOperation,
    AlreadySubscribed,
    InvalidEnum,
    DefinitionError,
    DuplicateId,
    DatumId,
    OutOfBounds,
    AlreadyCreated,
    ObjectOutsideRealityBubble,
    ObjectContainer,
    ObjectAi,
    ObjectAtc,
    ObjectSchedule,
}

impl SimException {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

pub fn exception_name(code: u32) -> &'static str {
    SimException::from_repr(code)
        .map(SimException::name)
        .unwrap_or(UNKNOWN_EXCEPTION)
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const KNOWN: [&str; 38] = [
        "NONE",
        "ERROR",
        "SIZE_MISMATCH",
        "UNRECOGNIZED_ID",
        "UNOPENED",
        "VERSION_MISMATCH",
        "TOO_MANY_GROUPS",
        "NAME_UNRECOGNIZED",
        "TOO_MANY_EVENT_NAMES",
        "EVENT_ID_DUPLICATE",
        "TOO_MANY_MAPS",
        "TOO_MANY_OBJECTS",
        "TOO_MANY_REQUESTS",
        "WEATHER_INVALID_PORT",
        "WEATHER_INVALID_METAR",
        "WEATHER_UNABLE_TO_GET_OBSERVATION",
        "WEATHER_UNABLE_TO_CREATE_STATION",
        "WEATHER_UNABLE_TO_REMOVE_STATION",
        "INVALID_DATA_TYPE",
        "INVALID_DATA_SIZE",
        "DATA_ERROR",
        "INVALID_ARRAY",
        "CREATE_OBJECT_FAILED",
        "LOAD_FLIGHTPLAN_FAILED",
        "OPERATION_INVALID_FOR_OBJECT_TYPE",
        "ILLEGAL_OPERATION",
        "ALREADY_SUBSCRIBED",
        "INVALID_ENUM",
        "DEFINITION_ERROR",
        "DUPLICATE_ID",
        "DATUM_ID",
        "OUT_OF_BOUNDS",
        "ALREADY_CREATED",
        "OBJECT_OUTSIDE_REALITY_BUBBLE",
        "OBJECT_CONTAINER",
        "OBJECT_AI",
        "OBJECT_ATC",
        "OBJECT_SCHEDULE",
    ];

    #[test]
    fn test_known_exception_names() {
        for (code, name) in KNOWN.iter().enumerate() {
            assert_eq!(*name, exception_name(code as u32), "code {}", code);
        }
    }

    #[test]
    fn test_unknown_exception_name() {
        assert_eq!("UNKNOWN", exception_name(997));
        assert_eq!("UNKNOWN", exception_name(38));
        assert_eq!("UNKNOWN", exception_name(u32::MAX));
    }

    proptest! {
        #[test]
        fn test_out_of_table_codes_are_unknown(code in 38u32..) {
            prop_assert_eq!(UNKNOWN_EXCEPTION, exception_name(code));
        }
    }
}
