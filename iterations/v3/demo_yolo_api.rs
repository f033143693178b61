//! YOLO-CoreML API Demo
//!
//! This standalone demo shows the YOLO object detection API
//! without requiring the full apple-silicon crate compilation.

#[derive(Debug, Clone)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Detection {
    pub class: String,
    pub class_id: usize,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

fn main() {
    println!("🚀 YOLO-CoreML Object Detection API Demo");
    println!("==========================================");
    
    // Show configuration
    println!("\n📋 YOLO Configuration:");
    println!("   Model: yolov3");
    println!("   Input Size: 416x416");
    println!("   Confidence Threshold: 0.5");
    println!("   IoU Threshold: 0.45");
    println!("   Max Detections: 50");
    println!("   Classes: 80 (COCO dataset)");
    
    // Simulate detection results
    println!("\n🔍 Simulated Detection Results:");
    let detections = vec![
        Detection {
            class: "car".to_string(),
            class_id: 2,
            confidence: 0.87,
            bbox: BoundingBox { x: 150.0, y: 200.0, width: 180.0, height: 120.0 },
        },
        Detection {
            class: "person".to_string(),
            class_id: 0,
            confidence: 0.92,
            bbox: BoundingBox { x: 300.0, y: 150.0, width: 60.0, height: 180.0 },
        },
        Detection {
            class: "traffic light".to_string(),
            class_id: 9,
            confidence: 0.78,
            bbox: BoundingBox { x: 400.0, y: 50.0, width: 25.0, height: 80.0 },
        },
    ];
    
    println!("   Image Size: 640x480");
    println!("   Processing Time: 45.2ms");
    println!("   Objects Detected: {}", detections.len());
    println!();
    
    for (i, detection) in detections.iter().enumerate() {
        println!("   {}. {} ({:.1}% confidence)", i + 1, detection.class, detection.confidence * 100.0);
        println!("      Location: ({:.0}, {:.0}) Size: {:.0}x{:.0}",
                detection.bbox.x, detection.bbox.y,
                detection.bbox.width, detection.bbox.height);
    }
    
    // Show API usage patterns
    println!("\n💻 API Usage Examples:");
    println!("   // Load and configure YOLO model");
    println!("   let config = YOLOConfig::default();");
    println!("   let model = load_yolo_model(model_path, config, telemetry, circuit_breaker).await?;");
    println!("   let executor = create_yolo_executor(model);");
    println!("   ");
    println!("   // Run object detection");
    println!("   let image = image::open(\"input.jpg\")?;");
    println!("   let options = YOLOInferenceOptions { confidence_threshold: Some(0.5), ..Default::default() };");
    println!("   let result = executor.detect_objects(&image, &options).await?;");
    println!("   ");
    println!("   // Process detections");
    println!("   for detection in &result.detections {");
    println!("       println!(\"Found {} at ({}, {}) with {:.1}% confidence\",");
    println!("               detection.class, detection.bbox.x, detection.bbox.y,");
    println!("               detection.confidence * 100.0);");
    println!("   }");
    
    // Show performance projections
    println!("\n⚡ Performance Projections:");
    println!("   ANE Speedup: 2.5-3x vs CPU inference");
    println!("   Target Latency: <100ms per image");
    println!("   Real-time Capable: 30+ FPS");
    println!("   Memory Usage: ~600MB peak");
    
    // Show integration points
    println!("\n🔗 Integration Points:");
    println!("   • Vision Enricher: UI element detection");
    println!("   • Diagrams Ingestor: Component recognition");
    println!("   • Video Ingestor: Scene analysis");
    println!("   • Research Agent: Visual evidence gathering");
    println!("   • Council: Enhanced deliberation context");
    
    println!("\n✅ YOLO-CoreML API Demo Complete!");
}
