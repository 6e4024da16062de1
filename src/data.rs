use crate::error::DecodeError;

/// `SIMCONNECT_DATATYPE`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum DataType {
    Invalid = 0,
    Int32,
    Int64,
    Float32,
    Float64,
    String8,
    String32,
    String64,
    String128,
    String256,
    String260,
    StringV,
    InitPosition,
    MarkerState,
    Waypoint,
    LatLonAlt,
    Xyz,
}

impl DataType {
    /// Structured types are defined without units, the host rejects them otherwise.
    pub fn is_struct(self) -> bool {
        matches!(
            self,
            DataType::InitPosition
                | DataType::MarkerState
                | DataType::Waypoint
                | DataType::LatLonAlt
                | DataType::Xyz
        )
    }
}

/// Layout of definition 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimData {
    pub simulation_time: f64,
}

impl SimData {
    pub const DEFINITION_ID: u32 = 0;
    pub const SIZE: usize = std::mem::size_of::<f64>();

    pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        let raw: [u8; Self::SIZE] = payload
            .get(..Self::SIZE)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(DecodeError::Truncated {
                tag: "SimData",
                needed: Self::SIZE,
                actual: payload.len(),
            })?;

        Ok(Self {
            simulation_time: f64::from_le_bytes(raw),
        })
    }
}
