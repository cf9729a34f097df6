//! Built-in CRUD template set.
//!
//! [`BuiltinTemplates`] ships the five templates `stencil generate` uses by
//! default. They render against the context built by
//! [`Model::to_context`](stencil_core::domain::Model::to_context):
//!
//! | Name      | Ext   | Produces                                        |
//! |-----------|-------|-------------------------------------------------|
//! | `types`   | `ts`  | model interface and input type                  |
//! | `service` | `ts`  | fetch-based API client                          |
//! | `mock`    | `ts`  | sample records built with `mockValue`           |
//! | `list`    | `tsx` | React table component                           |
//! | `form`    | `tsx` | React create form                               |
//!
//! A templates directory loaded after the built-ins overrides them by name.

use tracing::debug;

use stencil_core::{application::ports::TemplateSource, domain::Template, error::StencilResult};

/// Names of the built-in templates, in generation order.
pub const BUILTIN_NAMES: [&str; 5] = ["types", "service", "mock", "list", "form"];

const TYPES: &str = r#"// {{modelName}} types. Generated by stencil.

export interface {{modelName}} {
  id: string;
{{#each fields}}  {{name}}{{#if optional}}?{{/if}}: {{tsType}};
{{/each}}}

export type {{modelName}}Input = Omit<{{modelName}}, 'id'>;
"#;

const SERVICE: &str = r#"import type { {{modelName}}, {{modelName}}Input } from './{{modelKebab}}.types';

const BASE_URL = '/api/{{modelKebab}}s';

async function request<T>(url: string, init?: RequestInit): Promise<T> {
  const response = await fetch(url, {
    headers: { 'Content-Type': 'application/json' },
    ...init,
  });
  if (!response.ok) {
    throw new Error(`{{modelName}} request failed: ${response.status}`);
  }
  return response.json() as Promise<T>;
}

export const {{modelCamel}}Service = {
  list: () => request<{{modelName}}[]>(BASE_URL),
  get: (id: string) => request<{{modelName}}>(`${BASE_URL}/${id}`),
  create: (input: {{modelName}}Input) =>
    request<{{modelName}}>(BASE_URL, { method: 'POST', body: JSON.stringify(input) }),
  update: (id: string, input: Partial<{{modelName}}Input>) =>
    request<{{modelName}}>(`${BASE_URL}/${id}`, { method: 'PUT', body: JSON.stringify(input) }),
  remove: (id: string) => request<void>(`${BASE_URL}/${id}`, { method: 'DELETE' }),
};
"#;

const MOCK: &str = r#"import type { {{modelName}} } from './{{modelKebab}}.types';

export const mock{{modelName}}s: {{modelName}}[] = [
{{#each mockRows}}  {
    id: '{{rowId}}',
{{#each fields}}    {{name}}: {{mockValue type rowIndex}},
{{/each}}  },
{{/each}}];
"#;

const LIST: &str = r#"import { useEffect, useState } from 'react';
import type { {{modelName}} } from './{{modelKebab}}.types';
import { {{modelCamel}}Service } from './{{modelKebab}}.service';

export function {{modelName}}List() {
  const [items, setItems] = useState<{{modelName}}[]>([]);
  const [error, setError] = useState<string | null>(null);

  useEffect(() => {
    {{modelCamel}}Service.list().then(setItems).catch((e: Error) => setError(e.message));
  }, []);

  if (error) {
    return <p role="alert">{error}</p>;
  }

  return (
    <table>
      <thead>
        <tr>
{{#each fields}}          <th>{{label}}</th>
{{/each}}          <th />
        </tr>
      </thead>
      <tbody>
        {items.map((item) => (
          <tr key={item.id}>
{{#each fields}}            <td>{String(item.{{name}} ?? '')}</td>
{{/each}}            <td>
              <button onClick={() => {{modelCamel}}Service.remove(item.id)}>Delete</button>
            </td>
          </tr>
        ))}
      </tbody>
    </table>
  );
}
"#;

const FORM: &str = r#"import { useState, type FormEvent } from 'react';
import type { {{modelName}}Input } from './{{modelKebab}}.types';
import { {{modelCamel}}Service } from './{{modelKebab}}.service';

export function {{modelName}}Form({ onSaved }: { onSaved?: () => void }) {
  const [values, setValues] = useState<Partial<{{modelName}}Input>>({});

  const update = (field: keyof {{modelName}}Input, value: unknown) =>
    setValues((current) => ({ ...current, [field]: value }));

  const submit = async (event: FormEvent) => {
    event.preventDefault();
    await {{modelCamel}}Service.create(values as {{modelName}}Input);
    onSaved?.();
  };

  return (
    <form onSubmit={submit}>
{{#each fields}}      <label>
        {{label}}
        <input
          name="{{name}}"
          type="{{inputType}}"
{{#if required}}          required
{{/if}}          onChange={(e) => update('{{name}}', e.target.{{valueProp}})}
        />
      </label>
{{/each}}      <button type="submit">Save {{modelName}}</button>
    </form>
  );
}
"#;

/// The template set compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }

    /// All built-in templates, in [`BUILTIN_NAMES`] order.
    pub fn templates() -> Vec<Template> {
        vec![
            Template::new("types", TYPES, "ts"),
            Template::new("service", SERVICE, "ts"),
            Template::new("mock", MOCK, "ts"),
            Template::new("list", LIST, "tsx"),
            Template::new("form", FORM, "tsx"),
        ]
    }
}

impl TemplateSource for BuiltinTemplates {
    fn name(&self) -> &str {
        "builtin"
    }

    fn load(&self) -> StencilResult<Vec<Template>> {
        let templates = Self::templates();
        debug!(count = templates.len(), "built-in templates loaded");
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::{FieldSpec, FieldType, Model};
    use stencil_core::engine::Engine;

    fn engine() -> Engine {
        let mut engine = Engine::new();
        for template in BuiltinTemplates::templates() {
            engine.insert_template(template);
        }
        engine
    }

    fn user() -> Model {
        Model::new(
            "user-profile",
            vec![
                FieldSpec::new("email", FieldType::Email),
                FieldSpec::new("age", FieldType::Number).optional(),
                FieldSpec::new("active", FieldType::Boolean),
            ],
        )
    }

    #[test]
    fn names_match_templates() {
        let names: Vec<String> = BuiltinTemplates::templates()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, BUILTIN_NAMES);
        assert!(BuiltinTemplates::templates().iter().all(|t| t.validate().is_ok()));
    }

    #[test]
    fn every_template_renders_without_leftover_directives() {
        let engine = engine();
        let ctx = user().to_context();
        for name in BUILTIN_NAMES {
            let out = engine.render(name, &ctx).unwrap();
            assert!(!out.content.contains("{{"), "{name} left a directive:\n{}", out.content);
        }
    }

    #[test]
    fn types_marks_optional_fields() {
        let out = engine().render("types", &user().to_context()).unwrap();
        assert!(out.content.contains("export interface UserProfile {\n  id: string;\n"));
        assert!(out.content.contains("  email: string;\n"));
        assert!(out.content.contains("  age?: number;\n"));
        assert!(out.content.contains("  active: boolean;\n}\n"));
        assert_eq!(out.extension, "ts");
    }

    #[test]
    fn service_uses_kebab_route_and_camel_name() {
        let out = engine().render("service", &user().to_context()).unwrap();
        assert!(out.content.contains("const BASE_URL = '/api/user-profiles';"));
        assert!(out.content.contains("export const userProfileService = {"));
        assert!(out.content.contains("${response.status}"));
    }

    #[test]
    fn mock_rows_use_row_index() {
        let out = engine().render("mock", &user().to_context()).unwrap();
        assert!(out.content.contains("    id: '1',\n    email: 'user0@example.com',\n"));
        assert!(out.content.contains("    id: '3',\n    email: 'user2@example.com',\n"));
        assert_eq!(out.content.matches("  },\n").count(), 3);
    }

    #[test]
    fn form_marks_required_inputs_and_checkbox_values() {
        let out = engine().render("form", &user().to_context()).unwrap();
        assert!(out.content.contains("name=\"email\"\n          type=\"email\"\n          required\n"));
        assert!(out.content.contains("name=\"age\"\n          type=\"number\"\n          onChange"));
        assert!(out.content.contains("update('active', e.target.checked)"));
        assert_eq!(out.extension, "tsx");
    }

    #[test]
    fn list_has_one_column_per_field() {
        let out = engine().render("list", &user().to_context()).unwrap();
        assert_eq!(out.content.matches("<th>").count(), 3);
        assert!(out.content.contains("<th>Email</th>"));
        assert!(out.content.contains("{String(item.active ?? '')}"));
    }
}
