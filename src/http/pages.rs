//! Static HTML pages

pub const INDEX: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Viu API Gateway</title>
</head>
<body>
<h1>Viu API Gateway</h1>
<p>Every endpoint answers with <code>{"success": true, "data": ...}</code>
or <code>{"success": false, "error": "..."}</code>.</p>
<table>
<tr><th>Route</th><th>Description</th></tr>
<tr><td><code>GET /api/home</code></td><td>Home feed</td></tr>
<tr><td><code>GET /api/search?q=&amp;page=1&amp;count=18</code></td><td>Search titles; <code>q</code> is required</td></tr>
<tr><td><code>GET /api/detail/{id}</code></td><td>Title metadata and episode list</td></tr>
<tr><td><code>GET /api/stream/{ccsProductId}</code></td><td>Stream URLs for an episode</td></tr>
</table>
</body>
</html>
"#;

pub const NOT_FOUND: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>404 Not Found</title>
</head>
<body>
<h1>404 Not Found</h1>
<p>No such route. See <a href="/">the endpoint list</a>.</p>
</body>
</html>
"#;
