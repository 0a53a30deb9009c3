// Handlebars sources. `shell` wraps every page through a partial block;
// `title` and `signup_form` are the sign-up components.

pub const SHELL_TPL: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{page_title}}</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
{{> @partial-block}}
</body>
</html>
"#;

pub const TITLE_TPL: &str = r#"<h1 class="flex flex-row justify-center p-12 text-[#4caf50] text-6xl font-bold font-fredoka drop-shadow-2xl">{{text}}</h1>"#;

pub const SIGNUP_FORM_TPL: &str = r#"<form class="w-full max-w-md p-6 bg-white rounded-xl shadow" autocomplete="off">
{{#each fields}}
<input type="{{kind}}" placeholder="{{placeholder}}" class="w-full h-12 mb-4 p-3 bg-[#f0f0f0] placeholder-opacity-50 placeholder-gray-500 rounded">
{{/each}}
<button type="button" class="w-full h-12 p-3 bg-[#4caf50] text-white rounded hover:bg-[#45a049]">{{submit_label}}</button>
</form>"#;

pub const SIGNUP_TPL: &str = r#"{{#> shell}}
<div class="flex flex-col items-center min-h-screen bg-[#F0F0F0]">
{{#with title}}{{> title}}{{/with}}
{{#with form}}{{> signup_form}}{{/with}}
</div>
{{/shell}}"#;

pub const HOME_TPL: &str = r#"{{#> shell}}
<div class="flex flex-col items-center min-h-screen bg-[#F0F0F0]">
{{#with title}}{{> title}}{{/with}}
<form method="get" action="/{{lang}}/search" class="w-full max-w-md p-6 bg-white rounded-xl shadow">
<input type="search" name="search" placeholder="Search the pond" class="w-full h-12 mb-4 p-3 bg-[#f0f0f0] rounded">
<button type="submit" class="w-full h-12 p-3 bg-[#4caf50] text-white rounded hover:bg-[#45a049]">Search</button>
</form>
<nav class="p-6 flex gap-6">
<a href="/{{lang}}/post" class="text-[#4caf50]">Publish</a>
<a href="/{{lang}}/signup" class="text-[#4caf50]">Sign up</a>
</nav>
</div>
{{/shell}}"#;

pub const LIST_TPL: &str = r#"{{#> shell}}
<div class="flex flex-col items-center min-h-screen bg-[#F0F0F0]">
<h2 class="p-6 text-2xl font-bold">{{total}} result(s) for &ldquo;{{query}}&rdquo;</h2>
<ul class="w-full max-w-md">
{{#each posts}}
<li class="mb-4 p-4 bg-white rounded-xl shadow"><a href="/{{../lang}}/post/{{slug}}">{{title}}</a> <span class="text-gray-500">by {{author.name}}</span></li>
{{/each}}
</ul>
<nav class="p-6 flex gap-6">
{{#if prev_href}}<a rel="prev" href="{{{prev_href}}}">Previous</a>{{/if}}
<span>Page {{current_page}} of {{total_pages}}</span>
{{#if next_href}}<a rel="next" href="{{{next_href}}}">Next</a>{{/if}}
</nav>
</div>
{{/shell}}"#;

pub const POST_TPL: &str = r#"{{#> shell}}
<article class="flex flex-col items-center min-h-screen bg-[#F0F0F0]">
<h1 class="p-12 text-4xl font-bold">{{post.title}}</h1>
<p class="text-gray-500">{{post.author.name}} &middot; <time>{{published}}</time></p>
<div class="w-full max-w-md p-6 bg-white rounded-xl shadow whitespace-pre-wrap">{{post.body}}</div>
</article>
{{/shell}}"#;

pub const PUBLISH_TPL: &str = r#"{{#> shell}}
<div class="flex flex-col items-center min-h-screen bg-[#F0F0F0]">
<form id="publish-form" data-endpoint="/{{lang}}/post" class="w-full max-w-md p-6 bg-white rounded-xl shadow">
<input type="text" name="title" placeholder="Title" class="w-full h-12 mb-4 p-3 bg-[#f0f0f0] rounded">
<textarea name="body" placeholder="Ribbit..." class="w-full mb-4 p-3 bg-[#f0f0f0] rounded"></textarea>
<input type="text" name="tags" placeholder="Tags" class="w-full h-12 mb-4 p-3 bg-[#f0f0f0] rounded">
<ul id="challenges" hidden>
{{#each challenges}}
<li data-challenge="{{this}}"></li>
{{/each}}
</ul>
<button type="submit" class="w-full h-12 p-3 bg-[#4caf50] text-white rounded hover:bg-[#45a049]">Publish</button>
</form>
</div>
{{/shell}}"#;
