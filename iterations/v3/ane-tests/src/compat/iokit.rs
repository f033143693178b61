//! IOKit compatibility layer for ANE telemetry
//!
//! This module provides optional IOKit integration for hardware telemetry
//! including temperature, power consumption, and device status monitoring.

use crate::errors::{ANEError, Result};

/// Target platform detection
#[cfg(all(target_os = "macos", target_arch = "aarch64"))]
const TARGET_APPLE_SILICON: bool = true;

#[cfg(not(all(target_os = "macos", target_arch = "aarch64")))]
const TARGET_APPLE_SILICON: bool = false;

/// IOKit hardware telemetry interface
#[cfg(all(target_os = "macos", target_arch = "aarch64"))]
pub mod iokit {
    use super::*;

    /// Get current system temperature in Celsius
    /// 
    /// This is a placeholder implementation that would query IOKit
    /// for thermal sensor data
    pub fn temperature_celsius() -> Option<f32> {
        // TODO: Implement actual IOKit temperature query
        // This would require IOKit framework bindings to query thermal sensors
        // For now, return a reasonable default
        Some(45.0)
    }

    /// Get current power consumption in watts
    /// 
    /// This is a placeholder implementation that would query IOKit
    /// for power management data
    pub fn power_watts() -> Option<f32> {
        // TODO: Implement actual IOKit power query
        // This would require IOKit framework bindings to query power management
        // For now, return a reasonable default
        Some(5.0)
    }

    /// Get ANE-specific thermal data
    /// 
    /// This would query ANE thermal sensors if available
    pub fn ane_temperature_celsius() -> Option<f32> {
        // TODO: Implement ANE-specific thermal monitoring
        // This would require access to ANE thermal sensors
        temperature_celsius()
    }

    /// Get ANE-specific power consumption
    /// 
    /// This would query ANE power consumption if available
    pub fn ane_power_watts() -> Option<f32> {
        // TODO: Implement ANE-specific power monitoring
        // This would require access to ANE power management
        Some(2.0) // ANE typically consumes less power than full system
    }

    /// Get system thermal pressure level
    /// 
    /// Returns thermal pressure as a percentage (0.0-100.0)
    pub fn thermal_pressure_percent() -> Option<f32> {
        // TODO: Implement thermal pressure monitoring
        // This would query system thermal management
        Some(0.0) // No thermal pressure by default
    }

    /// Get fan speed as percentage (if available)
    pub fn fan_speed_percent() -> Option<f32> {
        // TODO: Implement fan speed monitoring
        // This would query system fan controllers
        None // Fan speed not always available
    }

    /// Get battery temperature (if available)
    pub fn battery_temperature_celsius() -> Option<f32> {
        // TODO: Implement battery temperature monitoring
        // This would query battery thermal sensors
        None // Battery temperature not always available
    }

    /// Get comprehensive thermal status
    pub fn thermal_status() -> ThermalStatus {
        ThermalStatus {
            system_temperature: temperature_celsius().unwrap_or(45.0),
            ane_temperature: ane_temperature_celsius(),
            battery_temperature: battery_temperature_celsius(),
            thermal_pressure: thermal_pressure_percent().unwrap_or(0.0),
            fan_speed: fan_speed_percent(),
            is_throttling: thermal_pressure_percent().unwrap_or(0.0) > 50.0,
        }
    }

    /// Get comprehensive power status
    pub fn power_status() -> PowerStatus {
        PowerStatus {
            system_power: power_watts().unwrap_or(5.0),
            ane_power: ane_power_watts().unwrap_or(2.0),
            thermal_pressure: thermal_pressure_percent().unwrap_or(0.0),
        }
    }
}

/// Stub implementation for non-Apple Silicon platforms
#[cfg(not(all(target_os = "macos", target_arch = "aarch64")))]
pub mod iokit {
    use super::*;

    pub fn temperature_celsius() -> Option<f32> { None }
    pub fn power_watts() -> Option<f32> { None }
    pub fn ane_temperature_celsius() -> Option<f32> { None }
    pub fn ane_power_watts() -> Option<f32> { None }
    pub fn thermal_pressure_percent() -> Option<f32> { None }
    pub fn fan_speed_percent() -> Option<f32> { None }
    pub fn battery_temperature_celsius() -> Option<f32> { None }
    
    pub fn thermal_status() -> ThermalStatus {
        ThermalStatus {
            system_temperature: 25.0,
            ane_temperature: None,
            battery_temperature: None,
            thermal_pressure: 0.0,
            fan_speed: None,
            is_throttling: false,
        }
    }
    
    pub fn power_status() -> PowerStatus {
        PowerStatus {
            system_power: 0.0,
            ane_power: 0.0,
            thermal_pressure: 0.0,
        }
    }
}

/// Thermal status information
#[derive(Debug, Clone)]
pub struct ThermalStatus {
    pub system_temperature: f32,
    pub ane_temperature: Option<f32>,
    pub battery_temperature: Option<f32>,
    pub thermal_pressure: f32,
    pub fan_speed: Option<f32>,
    pub is_throttling: bool,
}

/// Power status information
#[derive(Debug, Clone)]
pub struct PowerStatus {
    pub system_power: f32,
    pub ane_power: f32,
    pub thermal_pressure: f32,
}

/// IOKit device information
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub device_name: String,
    pub device_type: String,
    pub is_available: bool,
    pub capabilities: Vec<String>,
}

/// Get device information for ANE
pub fn get_ane_device_info() -> Result<DeviceInfo> {
    if !TARGET_APPLE_SILICON {
        return Err(ANEError::Unavailable);
    }

    Ok(DeviceInfo {
        device_name: "Apple Neural Engine".to_string(),
        device_type: "Neural Processing Unit".to_string(),
        is_available: true,
        capabilities: vec![
            "fp16".to_string(),
            "int8".to_string(),
            "neural_processing".to_string(),
        ],
    })
}

/// Get system thermal management capabilities
pub fn get_thermal_capabilities() -> ThermalCapabilities {
    ThermalCapabilities {
        temperature_monitoring: TARGET_APPLE_SILICON,
        power_monitoring: TARGET_APPLE_SILICON,
        thermal_pressure_monitoring: TARGET_APPLE_SILICON,
        fan_control: TARGET_APPLE_SILICON,
        battery_monitoring: TARGET_APPLE_SILICON,
    }
}

/// Thermal management capabilities
#[derive(Debug, Clone)]
pub struct ThermalCapabilities {
    pub temperature_monitoring: bool,
    pub power_monitoring: bool,
    pub thermal_pressure_monitoring: bool,
    pub fan_control: bool,
    pub battery_monitoring: bool,
}

/// Initialize IOKit monitoring (placeholder)
pub fn initialize_monitoring() -> Result<()> {
    if !TARGET_APPLE_SILICON {
        return Err(ANEError::Unavailable);
    }

    // TODO: Implement actual IOKit initialization
    // This would set up monitoring for thermal and power sensors
    Ok(())
}

/// Shutdown IOKit monitoring (placeholder)
pub fn shutdown_monitoring() -> Result<()> {
    if !TARGET_APPLE_SILICON {
        return Err(ANEError::Unavailable);
    }

    // TODO: Implement actual IOKit cleanup
    // This would clean up monitoring resources
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_detection() {
        let is_apple_silicon = TARGET_APPLE_SILICON;
        assert!(is_apple_silicon == cfg!(all(target_os = "macos", target_arch = "aarch64")));
    }

    #[test]
    fn test_thermal_status() {
        let status = iokit::thermal_status();
        assert!(status.system_temperature > 0.0);
        assert!(status.thermal_pressure >= 0.0);
        assert!(status.thermal_pressure <= 100.0);
    }

    #[test]
    fn test_power_status() {
        let status = iokit::power_status();
        assert!(status.system_power >= 0.0);
        assert!(status.ane_power >= 0.0);
        assert!(status.thermal_pressure >= 0.0);
    }

    #[test]
    fn test_device_info() {
        let result = get_ane_device_info();
        if TARGET_APPLE_SILICON {
            assert!(result.is_ok());
            let info = result.unwrap();
            assert_eq!(info.device_name, "Apple Neural Engine");
            assert!(info.is_available);
        } else {
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_thermal_capabilities() {
        let capabilities = get_thermal_capabilities();
        assert_eq!(capabilities.temperature_monitoring, TARGET_APPLE_SILICON);
        assert_eq!(capabilities.power_monitoring, TARGET_APPLE_SILICON);
    }

    #[test]
    fn test_monitoring_lifecycle() {
        let init_result = initialize_monitoring();
        let shutdown_result = shutdown_monitoring();
        
        if TARGET_APPLE_SILICON {
            assert!(init_result.is_ok());
            assert!(shutdown_result.is_ok());
        } else {
            assert!(init_result.is_err());
            assert!(shutdown_result.is_err());
        }
    }
}
