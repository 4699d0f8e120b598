//! Upstream `create vite` template contents used by tests.

use crate::deps::DependencySet;
use crate::error::{KickstackError, Result};
use crate::external::{Generator, Installer};
use crate::paths;
use crate::types::{FeatureFlags, ProjectSpec};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <link rel="icon" type="image/svg+xml" href="/vite.svg" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Vite + React</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.jsx"></script>
  </body>
</html>
"#;

pub const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

// https://vite.dev/config/
export default defineConfig({
  plugins: [react()],
})
"#;

pub const APP_JSX: &str = r#"import { useState } from 'react'
import reactLogo from './assets/react.svg'
import viteLogo from '/vite.svg'
import './App.css'

function App() {
  const [count, setCount] = useState(0)

  return (
    <>
      <div>
        <a href="https://vite.dev" target="_blank">
          <img src={viteLogo} className="logo" alt="Vite logo" />
        </a>
      </div>
      <h1>Vite + React</h1>
      <button onClick={() => setCount((count) => count + 1)}>
        count is {count}
      </button>
      <p className="read-the-docs">
        Click on the Vite and React logos to learn more
      </p>
    </>
  )
}

export default App
"#;

pub const APP_CSS: &str = r#"#root {
  max-width: 1280px;
  margin: 0 auto;
}

.logo {
  height: 6em;
}
"#;

pub const INDEX_CSS: &str = r#":root {
  font-family: system-ui, Avenir, Helvetica, Arial, sans-serif;
}
"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "demo-app",
  "private": true,
  "version": "0.0.0",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "vite build",
    "lint": "eslint .",
    "preview": "vite preview"
  }
}
"#;

/// Write the upstream skeleton for `flags` into `root`.
pub fn write_upstream(root: &Path, flags: &FeatureFlags) {
    let files = [
        (paths::INDEX_HTML.to_string(), INDEX_HTML),
        (paths::build_config(flags), VITE_CONFIG),
        (paths::app_component(flags), APP_JSX),
        (paths::main_entry(flags), "import App from './App'\n"),
        (paths::APP_CSS.to_string(), APP_CSS),
        (paths::INDEX_CSS.to_string(), INDEX_CSS),
        (paths::PACKAGE_JSON.to_string(), PACKAGE_JSON),
        ("src/assets/react.svg".to_string(), "<svg/>"),
        ("public/vite.svg".to_string(), "<svg/>"),
    ];
    for (rel, contents) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

/// Generator that lays down the fixture skeleton, optionally with one file
/// replaced to simulate a drifted upstream template.
#[derive(Default)]
pub struct FakeUpstream {
    pub overrides: Vec<(String, String)>,
    pub fail: bool,
    pub calls: RefCell<u32>,
}

impl Generator for FakeUpstream {
    fn scaffold(&self, spec: &ProjectSpec) -> Result<()> {
        *self.calls.borrow_mut() += 1;
        if self.fail {
            return Err(KickstackError::ExternalTool {
                tool: "npm".into(),
                detail: "exit status: 1".into(),
            });
        }
        write_upstream(spec.directory(), &spec.flags());
        for (rel, contents) in &self.overrides {
            std::fs::write(spec.directory().join(rel), contents).unwrap();
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingInstaller {
    pub installs: RefCell<Vec<(PathBuf, DependencySet)>>,
}

impl Installer for RecordingInstaller {
    fn install(&self, dir: &Path, deps: &DependencySet) -> Result<()> {
        self.installs
            .borrow_mut()
            .push((dir.to_path_buf(), deps.clone()));
        Ok(())
    }
}
