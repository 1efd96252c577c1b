#![no_main]

use libfuzzer_sys::fuzz_target;

use qualgate_admission::AlwaysQualifyImages;
use qualgate_core::admission::{
    AdmissionObject, AttributesRecord, GroupVersionResource, Operation,
};
use qualgate_core::plugin::MutationInterface;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(object) = AdmissionObject::from_json(value) else {
        return;
    };
    let Ok(plugin) = AlwaysQualifyImages::from_reader(None::<&[u8]>) else {
        return;
    };

    let mut attributes = AttributesRecord::new(
        Operation::Create,
        GroupVersionResource::core("pods", "v1"),
        Some(object),
    );
    let _ = plugin.admit(&mut attributes);
});
