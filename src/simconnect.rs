//! [`SimHost`] over the real SimConnect client library.
//!
//! Talks to the SDK through `msfs::sys` rather than `msfs::sim_connect::SimConnect`:
//! the wrapper only exposes a callback dispatch, and the probe wants to pull
//! records one by one with `SimConnect_GetNextDispatch`.

use crate::data::DataType;
use crate::error::{DecodeError, HostError};
use crate::host::SimHost;
use crate::recv::Message;
use msfs::sys;
use std::ffi::CString;
use std::ptr;

const SIMCONNECT_UNUSED: u32 = u32::MAX;
const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;

pub struct SimConnectHost {
    handle: sys::HANDLE,
}

impl SimConnectHost {
    /// `config_index` selects the `SimConnect.cfg` entry, 0 is the local sim.
    pub fn open(name: &str, config_index: u32) -> Result<Self, HostError> {
        let name = c_string("SimConnect_Open", name)?;
        let mut handle: sys::HANDLE = ptr::null_mut();

        let hr = unsafe {
            sys::SimConnect_Open(
                &mut handle,
                name.as_ptr(),
                ptr::null_mut(),
                0,
                ptr::null_mut(),
                config_index,
            )
        };
        check("SimConnect_Open", hr)?;

        Ok(Self { handle })
    }

    fn handle(&self) -> Result<sys::HANDLE, HostError> {
        if self.handle.is_null() {
            Err(HostError::Closed)
        } else {
            Ok(self.handle)
        }
    }
}

impl SimHost for SimConnectHost {
    fn subscribe_to_system_event(&mut self, event_id: u32, name: &str) -> Result<(), HostError> {
        let call = "SimConnect_SubscribeToSystemEvent";
        let name = c_string(call, name)?;
        let hr = unsafe { sys::SimConnect_SubscribeToSystemEvent(self.handle()?, event_id, name.as_ptr()) };
        check(call, hr)
    }

    fn map_client_event_to_sim_event(
        &mut self,
        event_id: u32,
        name: &str,
    ) -> Result<(), HostError> {
        let call = "SimConnect_MapClientEventToSimEvent";
        let name = c_string(call, name)?;
        let hr = unsafe { sys::SimConnect_MapClientEventToSimEvent(self.handle()?, event_id, name.as_ptr()) };
        check(call, hr)
    }

    fn add_client_event_to_notification_group(
        &mut self,
        group_id: u32,
        event_id: u32,
        maskable: bool,
    ) -> Result<(), HostError> {
        let hr = unsafe {
            sys::SimConnect_AddClientEventToNotificationGroup(
                self.handle()?,
                group_id,
                event_id,
                maskable as i32,
            )
        };
        check("SimConnect_AddClientEventToNotificationGroup", hr)
    }

    fn set_notification_group_priority(
        &mut self,
        group_id: u32,
        priority: u32,
    ) -> Result<(), HostError> {
        let hr = unsafe { sys::SimConnect_SetNotificationGroupPriority(self.handle()?, group_id, priority) };
        check("SimConnect_SetNotificationGroupPriority", hr)
    }

    fn add_to_data_definition(
        &mut self,
        define_id: u32,
        datum_name: &str,
        units: Option<&str>,
        data_type: DataType,
    ) -> Result<(), HostError> {
        let call = "SimConnect_AddToDataDefinition";
        let datum_name = c_string(call, datum_name)?;
        let units = units.map(|u| c_string(call, u)).transpose()?;

        let hr = unsafe {
            sys::SimConnect_AddToDataDefinition(
                self.handle()?,
                define_id,
                datum_name.as_ptr(),
                units.as_ref().map_or(ptr::null(), |u| u.as_ptr()),
                data_type as u32 as sys::SIMCONNECT_DATATYPE,
                0.0,
                SIMCONNECT_UNUSED,
            )
        };
        check(call, hr)
    }

    fn request_data_on_sim_object_type(
        &mut self,
        request_id: u32,
        define_id: u32,
        radius_meters: u32,
        object_type: u32,
    ) -> Result<(), HostError> {
        let hr = unsafe {
            sys::SimConnect_RequestDataOnSimObjectType(
                self.handle()?,
                request_id,
                define_id,
                radius_meters,
                object_type as sys::SIMCONNECT_SIMOBJECT_TYPE,
            )
        };
        check("SimConnect_RequestDataOnSimObjectType", hr)
    }

    fn next_message(&mut self) -> Option<Result<Message, DecodeError>> {
        let handle = self.handle().ok()?;
        let mut data: *mut sys::SIMCONNECT_RECV = ptr::null_mut();
        let mut size: sys::DWORD = 0;

        // fails once the queue is empty
        let hr = unsafe { sys::SimConnect_GetNextDispatch(handle, &mut data, &mut size) };
        if hr < 0 || data.is_null() {
            return None;
        }

        // SAFETY: the record stays valid until the next dispatch call and is
        // `size` bytes long; it is copied out by `decode` before that happens.
        let raw = unsafe { std::slice::from_raw_parts(data as *const u8, size as usize) };
        Some(Message::decode(raw))
    }

    fn close(&mut self) -> Result<(), HostError> {
        if self.handle.is_null() {
            return Ok(());
        }
        let hr = unsafe { sys::SimConnect_Close(self.handle) };
        self.handle = ptr::null_mut();
        check("SimConnect_Close", hr)
    }
}

impl Drop for SimConnectHost {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn check(call: &'static str, hr: sys::HRESULT) -> Result<(), HostError> {
    if hr < 0 {
        Err(HostError::Failed {
            call,
            hresult: hr as i32,
        })
    } else {
        Ok(())
    }
}

fn c_string(call: &'static str, s: &str) -> Result<CString, HostError> {
    CString::new(s).map_err(|_| HostError::Failed {
        call,
        hresult: E_INVALIDARG,
    })
}
