//! Manual FFI bindings for the motion_primitive library
//!
//! This module provides a C-compatible interface so that a C++ simulator
//! driver can generate primitives and read back their velocity laws.
//!
//! The approach uses:
//! - `#[no_mangle]` functions with C calling convention
//! - An opaque store handle owning the builder and the accepted primitives
//! - Status codes instead of Rust errors
//! - Box allocation/deallocation patterns

use motion_primitive::{
    DeclineReason, Outcome, PrimitiveBuilder, PrimitiveRequest, PrimitiveStore,
};
use std::ffi::{c_double, c_uint};
use std::ptr;

/// Opaque handle to a primitive store and the builder that fills it
pub struct PrimitiveStoreHandle {
    builder: PrimitiveBuilder,
    store: PrimitiveStore,
}

/// Result of `motion_primitive_generate`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPrimitiveStatus {
    /// Primitive accepted and appended to the store
    Accepted = 0,
    /// No feasible duration inside the search window
    DeclinedBracketLost = 1,
    /// Zero displacement with different boundary velocities
    DeclinedInfiniteAcceleration = 2,
    /// Synchronised duration below the minimum
    DeclinedDurationTooShort = 3,
    /// Null pointer, zero joints, or a violated precondition
    InvalidInput = -1,
    /// The store has no room left
    StoreFull = -2,
}

/// C-compatible velocity law `v(t) = p0 + p1·t + p2·t²`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityCoefficients {
    pub p0: c_double,
    pub p1: c_double,
    pub p2: c_double,
}

/// Create an empty store holding at most `capacity` primitives, using the
/// default configuration
///
/// # Safety
/// The returned pointer must be freed using `motion_primitive_store_free`
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_store_new(capacity: c_uint) -> *mut PrimitiveStoreHandle {
    let handle = PrimitiveStoreHandle {
        builder: PrimitiveBuilder::default(),
        store: PrimitiveStore::with_capacity(capacity as usize),
    };

    Box::into_raw(Box::new(handle))
}

/// Free a store handle
///
/// # Safety
/// The pointer must be a valid pointer returned from
/// `motion_primitive_store_new` and must not be used after this call
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_store_free(store: *mut PrimitiveStoreHandle) {
    if !store.is_null() {
        unsafe {
            drop(Box::from_raw(store));
        }
    }
}

/// Number of primitives in the store
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_store_len(store: *const PrimitiveStoreHandle) -> c_uint {
    if store.is_null() {
        return 0;
    }

    let handle = unsafe { &*store };
    handle.store.len() as c_uint
}

/// Build a primitive and append it to the store if accepted
///
/// # Safety
/// - store pointer must be valid
/// - each array pointer must point to at least `dof` elements
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_generate(
    store: *mut PrimitiveStoreHandle,
    dof: c_uint,
    displacement: *const c_double,
    start_velocity: *const c_double,
    end_velocity: *const c_double,
    velocity_limit: *const c_double,
) -> MotionPrimitiveStatus {
    if store.is_null()
        || displacement.is_null()
        || start_velocity.is_null()
        || end_velocity.is_null()
        || velocity_limit.is_null()
        || dof == 0
    {
        return MotionPrimitiveStatus::InvalidInput;
    }

    let handle = unsafe { &mut *store };
    let len = dof as usize;
    let (displacement, start_velocity, end_velocity, velocity_limit) = unsafe {
        (
            std::slice::from_raw_parts(displacement, len),
            std::slice::from_raw_parts(start_velocity, len),
            std::slice::from_raw_parts(end_velocity, len),
            std::slice::from_raw_parts(velocity_limit, len),
        )
    };

    let request =
        match PrimitiveRequest::new(displacement, start_velocity, end_velocity, velocity_limit) {
            Ok(request) => request,
            Err(_) => return MotionPrimitiveStatus::InvalidInput,
        };

    if handle.store.is_full() {
        return MotionPrimitiveStatus::StoreFull;
    }

    match handle.builder.build(&request) {
        Outcome::Accepted(primitive) => match handle.store.push(primitive) {
            Ok(()) => MotionPrimitiveStatus::Accepted,
            Err(_) => MotionPrimitiveStatus::StoreFull,
        },
        Outcome::Declined(DeclineReason::BracketLost { .. }) => {
            MotionPrimitiveStatus::DeclinedBracketLost
        }
        Outcome::Declined(DeclineReason::InfiniteAcceleration { .. }) => {
            MotionPrimitiveStatus::DeclinedInfiniteAcceleration
        }
        Outcome::Declined(DeclineReason::DurationTooShort { .. }) => {
            MotionPrimitiveStatus::DeclinedDurationTooShort
        }
    }
}

/// Duration of the primitive at `index`, or a negative value if there is none
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_get_duration(
    store: *const PrimitiveStoreHandle,
    index: c_uint,
) -> c_double {
    if store.is_null() {
        return -1.0;
    }

    let handle = unsafe { &*store };
    handle
        .store
        .get(index as usize)
        .map_or(-1.0, |primitive| primitive.duration())
}

/// Number of joints of the primitive at `index`, or 0 if there is none
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_get_dof(
    store: *const PrimitiveStoreHandle,
    index: c_uint,
) -> c_uint {
    if store.is_null() {
        return 0;
    }

    let handle = unsafe { &*store };
    handle
        .store
        .get(index as usize)
        .map_or(0, |primitive| primitive.dof() as c_uint)
}

/// Velocity law of one joint of the primitive at `index`
///
/// Returns all-zero coefficients if the primitive or joint does not exist.
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_get_coefficients(
    store: *const PrimitiveStoreHandle,
    index: c_uint,
    joint: c_uint,
) -> VelocityCoefficients {
    if store.is_null() {
        return VelocityCoefficients::default();
    }

    let handle = unsafe { &*store };
    handle
        .store
        .get(index as usize)
        .and_then(|primitive| primitive.profiles().get(joint as usize))
        .map_or(VelocityCoefficients::default(), |profile| {
            VelocityCoefficients {
                p0: profile.p0(),
                p1: profile.p1(),
                p2: profile.p2(),
            }
        })
}

/// Write the joint velocities at time `t` of the primitive at `index` into
/// `velocities`
///
/// `t` is clamped to the primitive's duration. Returns false if the primitive
/// does not exist or `size` is smaller than its number of joints.
///
/// # Safety
/// velocities must point to at least `size` writable elements
#[unsafe(no_mangle)]
pub extern "C" fn motion_primitive_velocity_at(
    store: *const PrimitiveStoreHandle,
    index: c_uint,
    t: c_double,
    velocities: *mut c_double,
    size: c_uint,
) -> bool {
    if store.is_null() || velocities.is_null() {
        return false;
    }

    let handle = unsafe { &*store };
    let primitive = match handle.store.get(index as usize) {
        Some(primitive) => primitive,
        None => return false,
    };
    if (size as usize) < primitive.dof() {
        return false;
    }

    let sample = primitive.velocity_at(t);
    unsafe {
        ptr::copy_nonoverlapping(sample.as_ptr(), velocities, primitive.dof());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: [f64; 2] = [2.5, 2.5];

    fn generate(
        store: *mut PrimitiveStoreHandle,
        disp: [f64; 2],
        start: [f64; 2],
        end: [f64; 2],
    ) -> MotionPrimitiveStatus {
        motion_primitive_generate(
            store,
            2,
            disp.as_ptr(),
            start.as_ptr(),
            end.as_ptr(),
            LIMIT.as_ptr(),
        )
    }

    #[test]
    fn test_create_and_free_store() {
        let store = motion_primitive_store_new(4);
        assert!(!store.is_null());
        assert_eq!(motion_primitive_store_len(store), 0);

        motion_primitive_store_free(store);
    }

    #[test]
    fn test_generate_and_read_back() {
        let store = motion_primitive_store_new(4);

        let status = generate(store, [1.0, 1.0], [0.0, 0.0], [0.0, 0.0]);
        assert_eq!(status, MotionPrimitiveStatus::Accepted);
        assert_eq!(motion_primitive_store_len(store), 1);
        assert_eq!(motion_primitive_get_dof(store, 0), 2);

        let duration = motion_primitive_get_duration(store, 0);
        assert!((duration - 0.6).abs() < 1e-3);

        let coefficients = motion_primitive_get_coefficients(store, 0, 1);
        assert_eq!(coefficients.p0, 0.0);
        assert!(coefficients.p1 > 0.0);
        assert!(coefficients.p2 < 0.0);

        let mut velocities = [f64::NAN; 2];
        assert!(motion_primitive_velocity_at(
            store,
            0,
            duration / 2.0,
            velocities.as_mut_ptr(),
            2
        ));
        assert!(velocities[0] > 2.4 && velocities[0] <= 2.5);

        motion_primitive_store_free(store);
    }

    #[test]
    fn test_decline_codes() {
        let store = motion_primitive_store_new(4);

        assert_eq!(
            generate(store, [0.0, 0.0], [1.0, 1.0], [-1.0, -1.0]),
            MotionPrimitiveStatus::DeclinedInfiniteAcceleration
        );
        assert_eq!(
            generate(store, [100.0, 1.0], [0.0, 0.0], [0.0, 0.0]),
            MotionPrimitiveStatus::DeclinedBracketLost
        );
        assert_eq!(
            generate(store, [0.0, 0.0], [1.0, 0.0], [1.0, 0.0]),
            MotionPrimitiveStatus::DeclinedDurationTooShort
        );
        assert_eq!(motion_primitive_store_len(store), 0);

        motion_primitive_store_free(store);
    }

    #[test]
    fn test_invalid_input_and_full_store() {
        let store = motion_primitive_store_new(1);

        assert_eq!(
            generate(store, [1.0, 1.0], [3.0, 0.0], [0.0, 0.0]),
            MotionPrimitiveStatus::InvalidInput
        );
        assert_eq!(
            generate(store, [1.0, 1.0], [0.0, 0.0], [0.0, 0.0]),
            MotionPrimitiveStatus::Accepted
        );
        assert_eq!(
            generate(store, [1.0, -1.0], [0.0, 0.0], [0.0, 0.0]),
            MotionPrimitiveStatus::StoreFull
        );

        motion_primitive_store_free(store);
    }

    #[test]
    fn test_out_of_range_access() {
        let store = motion_primitive_store_new(1);

        assert!(motion_primitive_get_duration(store, 0) < 0.0);
        assert_eq!(
            motion_primitive_get_coefficients(store, 3, 0),
            VelocityCoefficients::default()
        );

        generate(store, [1.0, 1.0], [0.0, 0.0], [0.0, 0.0]);
        let mut too_small = [0.0; 1];
        assert!(!motion_primitive_velocity_at(
            store,
            0,
            0.0,
            too_small.as_mut_ptr(),
            1
        ));

        motion_primitive_store_free(store);
    }

    #[test]
    fn test_null_safety() {
        assert_eq!(motion_primitive_store_len(ptr::null()), 0);
        assert!(motion_primitive_get_duration(ptr::null(), 0) < 0.0);
        assert_eq!(motion_primitive_get_dof(ptr::null(), 0), 0);
        assert_eq!(
            motion_primitive_generate(
                ptr::null_mut(),
                2,
                ptr::null(),
                ptr::null(),
                ptr::null(),
                ptr::null()
            ),
            MotionPrimitiveStatus::InvalidInput
        );
        assert!(!motion_primitive_velocity_at(
            ptr::null(),
            0,
            0.0,
            ptr::null_mut(),
            0
        ));

        // Should not crash
        motion_primitive_store_free(ptr::null_mut());
    }
}
