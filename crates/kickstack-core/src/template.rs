//! Canonical contents for every file kickstack owns outright.
//!
//! Each [`TemplateFile`] is a pure function of [`FeatureFlags`]: the same flags
//! always produce byte-identical output.

use crate::error::Result;
use crate::io;
use crate::paths;
use crate::types::FeatureFlags;
use std::path::{Path, PathBuf};

pub const TAILWIND_DIRECTIVE: &str = r#"@import "tailwindcss";"#;

/// What a template file is for; the pipeline decides per role whether to write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Source,
    Stylesheet,
    BuildConfig,
    Tooling,
}

#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub relative_path: String,
    pub role: FileRole,
    generate: fn(&FeatureFlags) -> String,
}

impl TemplateFile {
    fn new(relative_path: String, role: FileRole, generate: fn(&FeatureFlags) -> String) -> Self {
        Self {
            relative_path,
            role,
            generate,
        }
    }

    pub fn render(&self, flags: &FeatureFlags) -> String {
        (self.generate)(flags)
    }
}

/// The full canonical file set for `flags`, in write order.
pub fn templates(flags: &FeatureFlags) -> Vec<TemplateFile> {
    vec![
        TemplateFile::new(paths::main_entry(flags), FileRole::Source, main_entry),
        TemplateFile::new(paths::app_component(flags), FileRole::Source, app_component),
        TemplateFile::new(paths::APP_CSS.into(), FileRole::Stylesheet, app_stylesheet),
        TemplateFile::new(paths::INDEX_CSS.into(), FileRole::Stylesheet, global_stylesheet),
        TemplateFile::new(paths::build_config(flags), FileRole::BuildConfig, build_config),
        TemplateFile::new(paths::ESLINT_CONFIG.into(), FileRole::Tooling, |_| {
            ESLINT_CONFIG.to_string()
        }),
        TemplateFile::new(paths::GITIGNORE.into(), FileRole::Tooling, |_| {
            GITIGNORE.to_string()
        }),
        TemplateFile::new(paths::VSCODE_EXTENSIONS.into(), FileRole::Tooling, |_| {
            VSCODE_EXTENSIONS.to_string()
        }),
        TemplateFile::new(paths::README_MD.into(), FileRole::Tooling, |_| {
            README.to_string()
        }),
    ]
}

/// Write every template accepted by `include` under `root`. Returns the
/// relative paths written. Each file is written atomically.
pub fn write_templates(
    root: &Path,
    flags: &FeatureFlags,
    include: impl Fn(&TemplateFile) -> bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for file in templates(flags).iter().filter(|f| include(f)) {
        let path = paths::resolve(root, &file.relative_path);
        io::atomic_write(&path, file.render(flags).as_bytes())?;
        tracing::debug!(file = %file.relative_path, "wrote template");
        written.push(PathBuf::from(&file.relative_path));
    }
    Ok(written)
}

/// Delete the upstream demo assets. Returns the relative paths removed.
pub fn remove_demo_assets(root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for rel in paths::DEMO_ASSETS {
        if io::remove_if_exists(&paths::resolve(root, rel))? {
            removed.push(PathBuf::from(rel));
        }
    }
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn main_entry(flags: &FeatureFlags) -> String {
    let root_lookup = if flags.is_ts() {
        "document.getElementById('root')!"
    } else {
        "document.getElementById('root')"
    };

    if flags.routing {
        format!(
            "import {{ StrictMode }} from 'react'\n\
             import {{ createRoot }} from 'react-dom/client'\n\
             import {{ createBrowserRouter, RouterProvider }} from 'react-router'\n\
             import './index.css'\n\
             import App from './App'\n\
             \n\
             const router = createBrowserRouter([\n  {{ path: '/', element: <App /> }},\n])\n\
             \n\
             createRoot({root_lookup}).render(\n  <StrictMode>\n    <RouterProvider router={{router}} />\n  </StrictMode>\n)\n"
        )
    } else {
        format!(
            "import {{ StrictMode }} from 'react'\n\
             import {{ createRoot }} from 'react-dom/client'\n\
             import './index.css'\n\
             import App from './App'\n\
             \n\
             createRoot({root_lookup}).render(\n  <StrictMode>\n    <App />\n  </StrictMode>\n)\n"
        )
    }
}

fn app_component(_: &FeatureFlags) -> String {
    APP_COMPONENT.to_string()
}

fn app_stylesheet(_: &FeatureFlags) -> String {
    String::new()
}

fn global_stylesheet(flags: &FeatureFlags) -> String {
    if flags.is_tailwind() {
        TAILWIND_DIRECTIVE.to_string()
    } else {
        String::new()
    }
}

fn build_config(flags: &FeatureFlags) -> String {
    let (import, plugins) = if flags.is_tailwind() {
        (
            "import tailwindcss from '@tailwindcss/vite'\n",
            "react(), tailwindcss()",
        )
    } else {
        ("", "react()")
    };
    format!(
        "import {{ defineConfig }} from 'vite'\n\
         import react from '@vitejs/plugin-react'\n\
         {import}\
         \n\
         // https://vite.dev/config/\n\
         export default defineConfig({{\n  plugins: [{plugins}],\n}})\n"
    )
}

// ---------------------------------------------------------------------------
// Fixed content
// ---------------------------------------------------------------------------

const APP_COMPONENT: &str = r#"import './App.css'

function App() {
  return (
    <>
      <h1>Welcome to my project</h1>
    </>
  )
}

export default App
"#;

/// Shared by every variant, so it only targets `.js`/`.jsx`; the default
/// parser cannot read TypeScript syntax.
const ESLINT_CONFIG: &str = r#"import js from '@eslint/js'
import globals from 'globals'
import reactHooks from 'eslint-plugin-react-hooks'
import reactRefresh from 'eslint-plugin-react-refresh'
import { defineConfig, globalIgnores } from 'eslint/config'

export default defineConfig([
  globalIgnores(['dist']),
  {
    files: ['**/*.{js,jsx}'],
    extends: [
      js.configs.recommended,
      reactHooks.configs['recommended-latest'],
      reactRefresh.configs.vite,
    ],
    languageOptions: {
      ecmaVersion: 2020,
      globals: globals.browser,
      parserOptions: {
        ecmaVersion: 'latest',
        ecmaFeatures: { jsx: true },
        sourceType: 'module',
      },
    },
    rules: {
      'no-unused-vars': ['error', { varsIgnorePattern: '^[A-Z_]' }],
    },
  },
])
"#;

const GITIGNORE: &str = r#"# Logs
logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*
pnpm-debug.log*
lerna-debug.log*

node_modules
dist
dist-ssr
*.local

# Editor directories and files
.vscode/*
!.vscode/extensions.json
.idea
.DS_Store
*.suo
*.ntvs*
*.njsproj
*.sln
*.sw?
"#;

const VSCODE_EXTENSIONS: &str = r#"{
  "recommendations": ["dbaeumer.vscode-eslint"]
}
"#;

const README: &str = r#"# Getting started

A clean React + Vite starter with the demo content removed.

## Scripts

- `npm run dev` starts the dev server with hot module replacement
- `npm run build` produces a production build in `dist/`
- `npm run preview` serves the production build locally
- `npm run lint` runs ESLint over the project

The lint config covers `.js` and `.jsx` sources. TypeScript projects can add
`typescript-eslint` to lint `.ts` and `.tsx` files as well.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LanguageVariant, StylingSystem};
    use crate::validate::DEMO_MARKERS;
    use tempfile::TempDir;

    fn render(flags: &FeatureFlags, rel: &str) -> String {
        templates(flags)
            .into_iter()
            .find(|f| f.relative_path == rel)
            .map(|f| f.render(flags))
            .unwrap()
    }

    #[test]
    fn app_component_has_no_demo_markers_for_any_flags() {
        for flags in FeatureFlags::all() {
            let app = render(&flags, &paths::app_component(&flags));
            for marker in DEMO_MARKERS {
                assert!(!app.contains(marker), "{marker:?} in App for {flags:?}");
            }
        }
    }

    #[test]
    fn every_combination_produces_full_file_set() {
        for flags in FeatureFlags::all() {
            let set = templates(&flags);
            assert_eq!(set.len(), 9);
            let ext = flags.language.jsx_ext();
            assert!(set.iter().any(|f| f.relative_path == format!("src/main.{ext}")));
            assert!(set.iter().any(|f| f.relative_path == format!("src/App.{ext}")));
        }
    }

    #[test]
    fn router_provider_only_when_routing() {
        for flags in FeatureFlags::all() {
            let main = render(&flags, &paths::main_entry(&flags));
            assert_eq!(main.contains("RouterProvider"), flags.routing, "{flags:?}");
            assert_eq!(main.contains("createBrowserRouter"), flags.routing);
            assert!(main.contains("import App from './App'"));
        }
    }

    #[test]
    fn ts_entry_uses_non_null_assertion() {
        let ts = FeatureFlags::new(LanguageVariant::Ts, StylingSystem::None, false);
        let js = FeatureFlags::new(LanguageVariant::Js, StylingSystem::None, false);
        assert!(render(&ts, "src/main.tsx").contains("getElementById('root')!"));
        assert!(!render(&js, "src/main.jsx").contains("getElementById('root')!"));
    }

    #[test]
    fn stylesheets_follow_styling_flag() {
        for flags in FeatureFlags::all() {
            assert_eq!(render(&flags, paths::APP_CSS), "");
            let index = render(&flags, paths::INDEX_CSS);
            if flags.is_tailwind() {
                assert_eq!(index, TAILWIND_DIRECTIVE);
            } else {
                assert_eq!(index, "");
            }
        }
    }

    #[test]
    fn build_config_plugin_list() {
        let tw = FeatureFlags::new(LanguageVariant::Ts, StylingSystem::Tailwind, false);
        let cfg = render(&tw, "vite.config.ts");
        assert!(cfg.contains("plugins: [react(), tailwindcss()]"));
        assert!(cfg.contains("import tailwindcss from '@tailwindcss/vite'"));

        let plain = FeatureFlags::new(LanguageVariant::Js, StylingSystem::None, true);
        let cfg = render(&plain, "vite.config.js");
        assert!(cfg.contains("plugins: [react()]"));
        assert!(!cfg.contains("tailwind"));
    }

    #[test]
    fn tooling_files_ignore_flags() {
        let all = FeatureFlags::all();
        for rel in [
            paths::ESLINT_CONFIG,
            paths::GITIGNORE,
            paths::VSCODE_EXTENSIONS,
            paths::README_MD,
        ] {
            let first = render(&all[0], rel);
            assert!(all.iter().all(|f| render(f, rel) == first), "{rel}");
        }
    }

    #[test]
    fn lint_scope_is_documented() {
        let flags = FeatureFlags::new(LanguageVariant::Ts, StylingSystem::None, false);
        let eslint = render(&flags, paths::ESLINT_CONFIG);
        assert!(eslint.contains("files: ['**/*.{js,jsx}']"));
        let readme = render(&flags, paths::README_MD);
        assert!(readme.contains("typescript-eslint"));
    }

    #[test]
    fn writing_twice_is_byte_identical() {
        let flags = FeatureFlags::new(LanguageVariant::Ts, StylingSystem::Tailwind, true);
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let written = write_templates(a.path(), &flags, |_| true).unwrap();
        write_templates(b.path(), &flags, |_| true).unwrap();
        assert_eq!(written.len(), 9);
        for rel in &written {
            assert_eq!(
                std::fs::read(a.path().join(rel)).unwrap(),
                std::fs::read(b.path().join(rel)).unwrap()
            );
        }
    }

    #[test]
    fn filter_skips_build_config() {
        let flags = FeatureFlags::new(LanguageVariant::Js, StylingSystem::None, false);
        let dir = TempDir::new().unwrap();
        let written =
            write_templates(dir.path(), &flags, |f| f.role != FileRole::BuildConfig).unwrap();
        assert_eq!(written.len(), 8);
        assert!(!dir.path().join("vite.config.js").exists());
    }

    #[test]
    fn demo_assets_removed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src/assets")).unwrap();
        std::fs::write(dir.path().join("src/assets/react.svg"), "<svg/>").unwrap();
        let removed = remove_demo_assets(dir.path()).unwrap();
        assert_eq!(removed, vec![PathBuf::from("src/assets")]);
        assert!(remove_demo_assets(dir.path()).unwrap().is_empty());
    }
}
