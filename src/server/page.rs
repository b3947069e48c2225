use crate::models::ModelInfo;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Image Generator</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🎨</text></svg>">
<style>
  body { font-family: system-ui, sans-serif; margin: 0; display: flex; min-height: 100vh; color: #262730; }
  aside { width: 300px; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
  aside code { display: block; background: #fff; padding: .5rem; margin: .4rem 0; border-radius: 4px; cursor: pointer; white-space: normal; }
  main { flex: 1; max-width: 730px; margin: 0 auto; padding: 2rem 1.5rem; }
  textarea { width: 100%; height: 120px; box-sizing: border-box; font: inherit; padding: .6rem; }
  .center { text-align: center; }
  button, .download { background: #ff4b4b; color: #fff; border: 0; border-radius: 6px; padding: .7rem 2rem; font-size: 1rem; cursor: pointer; text-decoration: none; display: inline-block; margin: 1rem 0; }
  button:disabled { opacity: .6; cursor: wait; }
  .msg { padding: .8rem 1rem; border-radius: 6px; margin: 1rem 0; white-space: pre-wrap; }
  .msg.error { background: #ffe4e4; } .msg.warn { background: #fff6d6; } .msg.ok { background: #dff5e3; } .msg.info { background: #e4f0ff; }
  #result img { max-width: 100%; }
  footer { text-align: center; color: gray; margin-top: 2rem; }
  hr { border: 0; border-top: 1px solid #ddd; margin: 1.5rem 0; }
</style>
</head>
<body>
<aside>
  <h3>ℹ️ About</h3>
  <p><strong>Model:</strong> {{MODEL_ID}}</p>
  <p>{{MODEL_DESCRIPTION}}</p>
  <hr>
  <h3>💡 Tips for Better Results</h3>
  <ul>{{TIPS}}</ul>
  <hr>
  <h3>📝 Example Prompts</h3>
  {{EXAMPLES}}
  <hr>
  <div class="msg info"><strong>Note:</strong> Free tier has rate limits. If you encounter errors, wait a few minutes.</div>
</aside>
<main>
  <h1>🎨 AI Image Generator</h1>
  <p>Generate stunning images from text using AI powered by {{MODEL_NAME}}</p>
  <hr>
  <label for="prompt">✍️ Enter your image description:</label>
  <textarea id="prompt" placeholder="Example: A magical forest with glowing mushrooms, fantasy art style, vibrant colors" title="Describe the image you want to generate. Be as detailed as possible!"></textarea>
  <div class="center"><button id="generate">🚀 Generate Image</button></div>
  <div id="status"></div>
  <div id="result" class="center"></div>
  <hr>
  <footer>Built with ❤️ using Rust &amp; HuggingFace {{MODEL_NAME}}</footer>
</main>
<script>
const promptEl = document.getElementById('prompt');
const button = document.getElementById('generate');
const statusEl = document.getElementById('status');
const resultEl = document.getElementById('result');
const icons = { model_loading: '⏳', rate_limited: '⚠️', unauthorized: '🔒', empty_prompt: '⚠️' };

function show(kind, text) {
  statusEl.innerHTML = '';
  if (!text) return;
  const div = document.createElement('div');
  div.className = 'msg ' + kind;
  div.textContent = text;
  statusEl.appendChild(div);
}

document.querySelectorAll('aside code').forEach(el => {
  el.addEventListener('click', () => { promptEl.value = el.textContent; });
});

button.addEventListener('click', async () => {
  const prompt = promptEl.value;
  resultEl.innerHTML = '';
  if (!prompt.trim()) {
    show('warn', '⚠️ Please enter a description for your image.');
    return;
  }
  button.disabled = true;
  show('info', '🎨 Creating your image... This may take 10-30 seconds...');
  try {
    const res = await fetch('/api/generate', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ prompt })
    });
    const body = await res.json();
    if (!res.ok) {
      const err = body.error || {};
      show(err.category === 'empty_prompt' ? 'warn' : 'error',
           (icons[err.category] || '❌') + ' ' + (err.message || 'An error occurred'));
      return;
    }
    show('ok', '✅ Image generated successfully!');
    const src = 'data:' + body.mime_type + ';base64,' + body.image_base64;
    const figure = document.createElement('figure');
    const img = document.createElement('img');
    img.src = src;
    img.alt = body.caption;
    const caption = document.createElement('figcaption');
    caption.textContent = body.caption;
    figure.append(img, caption);
    const link = document.createElement('a');
    link.className = 'download';
    link.href = src;
    link.download = body.filename;
    link.textContent = '⬇️ Download Image';
    resultEl.append(figure, link);
  } catch (e) {
    show('error', '❌ An error occurred: ' + e);
  } finally {
    button.disabled = false;
  }
});
</script>
</body>
</html>
"#;

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn render(model: &ModelInfo) -> String {
    let tips: String = model
        .tips
        .iter()
        .map(|tip| format!("<li>{}</li>", escape_html(tip)))
        .collect();
    let examples: String = model
        .example_prompts
        .iter()
        .map(|example| format!("<code>{}</code>", escape_html(example)))
        .collect::<Vec<_>>()
        .join("\n  ");

    TEMPLATE
        .replace("{{MODEL_ID}}", &escape_html(&model.id))
        .replace("{{MODEL_NAME}}", &escape_html(&model.name))
        .replace("{{MODEL_DESCRIPTION}}", &escape_html(&model.description))
        .replace("{{TIPS}}", &tips)
        .replace("{{EXAMPLES}}", &examples)
}
