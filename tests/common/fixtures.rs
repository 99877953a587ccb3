//! Catalog and package documents served by the mock server.

use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_PATH: &str = "/mc/game/version_manifest.json";
pub const GUAVA_PATH: &str = "com/google/guava/guava/31.1/guava-31.1.jar";
pub const GSON_PATH: &str = "com/google/code/gson/gson/2.10/gson-2.10.jar";
pub const LWJGL_NATIVE_PATH: &str = "org/lwjgl/lwjgl/3.3.1/lwjgl-3.3.1-natives-linux.jar";
pub const LWJGL_NATIVE_FILE: &str = "lwjgl-3.3.1-natives-linux.jar";

/// Catalog with `1.20.1` as latest release and `23w31a` as latest snapshot.
pub fn catalog(base: &str) -> Value {
    json!({
        "latest": {"release": "1.20.1", "snapshot": "23w31a"},
        "versions": [
            {"id": "23w31a", "type": "snapshot", "url": format!("{base}/v1/23w31a.json"),
             "time": "2023-08-02T10:00:00+00:00", "releaseTime": "2023-08-02T10:00:00+00:00"},
            {"id": "1.20.1", "type": "release", "url": format!("{base}/v1/1.20.1.json"),
             "time": "2023-06-12T13:25:51+00:00", "releaseTime": "2023-06-12T13:25:51+00:00"}
        ]
    })
}

/// Package for `id` with the client jar, two ordinary libraries and one
/// library carrying linux and windows natives.
pub fn package(base: &str, id: &str) -> Value {
    json!({
        "id": id,
        "type": "release",
        "mainClass": "net.minecraft.client.main.Main",
        "complianceLevel": 1,
        "assetIndex": {"id": "5", "sha1": "", "size": 1, "totalSize": 1,
                       "url": format!("{base}/assets/5.json")},
        "arguments": {"game": ["--version", "${version_name}"], "jvm": []},
        "downloads": {
            "client": {"sha1": "", "size": 6, "url": format!("{base}/objects/client.jar")},
            "server": {"sha1": "", "size": 6, "url": format!("{base}/objects/server.jar")}
        },
        "libraries": [
            {
                "name": "com.google.guava:guava:31.1",
                "downloads": {"artifact": {
                    "path": GUAVA_PATH, "sha1": "", "size": 5,
                    "url": format!("{base}/libraries/{GUAVA_PATH}")
                }}
            },
            {
                "name": "org.lwjgl:lwjgl:3.3.1",
                "natives": {"linux": "natives-linux", "windows": "natives-windows"},
                "downloads": {"classifiers": {
                    "natives-linux": {
                        "path": LWJGL_NATIVE_PATH, "sha1": "", "size": 6,
                        "url": format!("{base}/libraries/{LWJGL_NATIVE_PATH}")
                    },
                    "natives-windows": {
                        "path": "org/lwjgl/lwjgl/3.3.1/lwjgl-3.3.1-natives-windows.jar",
                        "sha1": "", "size": 6,
                        "url": format!("{base}/libraries/windows.jar")
                    }
                }}
            },
            {
                "name": "com.google.code.gson:gson:2.10",
                "downloads": {"artifact": {
                    "path": GSON_PATH, "sha1": "", "size": 4,
                    "url": format!("{base}/libraries/{GSON_PATH}")
                }}
            }
        ]
    })
}

/// Every regular file under `root`, keyed by relative path.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            (relative, std::fs::read(entry.path()).unwrap())
        })
        .collect()
}
