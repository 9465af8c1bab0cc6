//! Providers of the ordered list of core paths known to be obsolete.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcfError;
use crate::fs::join_root;
use crate::php;

/// Where the core upgrader keeps its `$_old_files` list, relative to the root.
pub const UPDATE_CORE_PHP: &str = "wp-admin/includes/update-core.php";
/// Where core declares `$wp_version`, relative to the root.
pub const VERSION_PHP: &str = "wp-includes/version.php";

/// Paths removed by past core upgrades, oldest release first.
pub const BUNDLED_OLD_FILES: &[&str] = &[
    // 2.0
    "wp-admin/import-b2.php",
    "wp-admin/import-blogger.php",
    "wp-admin/import-greymatter.php",
    "wp-admin/import-livejournal.php",
    "wp-admin/import-mt.php",
    "wp-admin/import-rss.php",
    "wp-admin/import-textpattern.php",
    "wp-admin/quicktags.js",
    "wp-images/fade-butt.png",
    "wp-images/get-firefox.png",
    "wp-images/header-shadow.png",
    "wp-images/smilies",
    "wp-images/wp-small.png",
    "wp-images/wpminilogo.png",
    "wp.php",
    // 2.1
    "wp-admin/edit-form-ajax-cat.php",
    "wp-admin/execute-pings.php",
    "wp-admin/inline-uploading.php",
    "wp-admin/link-categories.php",
    "wp-admin/list-manipulation.js",
    "wp-admin/list-manipulation.php",
    "wp-includes/comment-functions.php",
    "wp-includes/feed-functions.php",
    "wp-includes/functions-compat.php",
    "wp-includes/functions-formatting.php",
    "wp-includes/functions-post.php",
    "wp-includes/js/dbx-key.js",
    "wp-includes/links.php",
    "wp-includes/pluggable-functions.php",
    "wp-includes/template-functions-author.php",
    "wp-includes/template-functions-category.php",
    "wp-includes/template-functions-general.php",
    "wp-includes/template-functions-links.php",
    "wp-includes/template-functions-post.php",
    "wp-includes/wp-l10n.php",
    // 2.2
    "wp-admin/cat-js.php",
    "wp-admin/import/b2.php",
    "wp-includes/js/autosave-js.php",
    "wp-includes/js/list-manipulation-js.php",
    "wp-includes/js/wp-ajax-js.php",
    // 2.3
    "wp-admin/admin-db.php",
    "wp-admin/cat.js",
    "wp-admin/categories.js",
    "wp-admin/custom-fields.js",
    "wp-admin/dbx-admin-key.js",
    "wp-admin/edit-comments.js",
    "wp-admin/install-rtl.css",
    "wp-admin/install.css",
    "wp-admin/upgrade-schema.php",
    "wp-admin/upload-functions.php",
    "wp-admin/upload-rtl.css",
    "wp-admin/upload.css",
    "wp-admin/upload.js",
    "wp-admin/users.js",
    "wp-admin/widgets-rtl.css",
    "wp-admin/widgets.css",
    "wp-admin/xfn.js",
    "wp-includes/js/tinymce/license.html",
    // 2.5
    "wp-admin/css/upload.css",
    "wp-admin/images/box-bg-left.gif",
    "wp-admin/images/box-bg-right.gif",
    "wp-admin/images/box-bg.gif",
    "wp-admin/images/box-butt-left.gif",
    "wp-admin/images/box-butt-right.gif",
    "wp-admin/images/box-butt.gif",
    "wp-admin/images/box-head-left.gif",
    "wp-admin/images/box-head-right.gif",
    "wp-admin/images/box-head.gif",
    "wp-admin/images/heading-bg.gif",
    "wp-admin/images/login-bkg-bottom.gif",
    "wp-admin/images/login-bkg-tile.gif",
    "wp-admin/images/notice.gif",
    "wp-admin/images/toggle.gif",
    "wp-admin/includes/upload.php",
    "wp-admin/js/dbx-admin-key.js",
    "wp-admin/js/link-cat.js",
    "wp-admin/profile-update.php",
    "wp-admin/templates.php",
    "wp-includes/images/wlw/WpComments.png",
    "wp-includes/images/wlw/WpIcon.png",
    "wp-includes/images/wlw/WpWatermark.png",
    "wp-includes/js/dbx.js",
    "wp-includes/js/fat.js",
    "wp-includes/js/list-manipulation.js",
    "wp-includes/js/tinymce/langs/en.js",
    "wp-includes/js/tinymce/plugins/autosave/editor_plugin_src.js",
    "wp-includes/js/tinymce/plugins/autosave/langs",
    "wp-includes/js/tinymce/plugins/directionality/images",
    "wp-includes/js/tinymce/plugins/directionality/langs",
    "wp-includes/js/tinymce/plugins/inlinepopups/css",
    "wp-includes/js/tinymce/plugins/inlinepopups/images",
    "wp-includes/js/tinymce/plugins/inlinepopups/jscripts",
    "wp-includes/js/tinymce/plugins/paste/images",
    "wp-includes/js/tinymce/plugins/paste/jscripts",
    "wp-includes/js/tinymce/plugins/paste/langs",
    "wp-includes/js/tinymce/plugins/spellchecker/classes/HttpClient.class.php",
    "wp-includes/js/tinymce/plugins/spellchecker/classes/TinyGoogleSpell.class.php",
    "wp-includes/js/tinymce/plugins/spellchecker/classes/TinyPspell.class.php",
    "wp-includes/js/tinymce/plugins/spellchecker/classes/TinyPspellShell.class.php",
    "wp-includes/js/tinymce/plugins/spellchecker/css/spellchecker.css",
    "wp-includes/js/tinymce/plugins/spellchecker/images",
    "wp-includes/js/tinymce/plugins/spellchecker/langs",
    "wp-includes/js/tinymce/plugins/spellchecker/tinyspell.php",
    "wp-includes/js/tinymce/plugins/wordpress/images",
    "wp-includes/js/tinymce/plugins/wordpress/langs",
    "wp-includes/js/tinymce/plugins/wordpress/wordpress.css",
    "wp-includes/js/tinymce/plugins/wphelp",
    "wp-includes/js/tinymce/themes/advanced/css",
    "wp-includes/js/tinymce/themes/advanced/images",
    "wp-includes/js/tinymce/themes/advanced/jscripts",
    "wp-includes/js/tinymce/themes/advanced/langs",
    // 2.5.1
    "wp-includes/js/tinymce/tiny_mce_gzip.php",
    // 2.6
    "wp-admin/bookmarklet.php",
    "wp-includes/js/jquery/jquery.dimensions.min.js",
    "wp-includes/js/tinymce/plugins/wordpress/popups.css",
    "wp-includes/js/wp-ajax.js",
    // 2.7
    "wp-admin/css/press-this-ie-rtl.css",
    "wp-admin/css/press-this-ie.css",
    "wp-admin/css/upload-rtl.css",
    "wp-admin/edit-form.php",
    "wp-admin/images/comment-pill.gif",
    "wp-admin/images/comment-stalk-classic.gif",
    "wp-admin/images/comment-stalk-fresh.gif",
    "wp-admin/images/comment-stalk-rtl.gif",
    "wp-admin/images/del.png",
    "wp-admin/images/gear.png",
    "wp-admin/images/media-button-gallery.gif",
    "wp-admin/images/media-buttons.gif",
    "wp-admin/images/postbox-bg.gif",
    "wp-admin/images/tab.png",
    "wp-admin/images/tail.gif",
    "wp-admin/js/forms.js",
    "wp-admin/js/upload.js",
    "wp-admin/link-import.php",
    "wp-includes/images/audio.png",
    "wp-includes/images/css.png",
    "wp-includes/images/default.png",
    "wp-includes/images/doc.png",
    "wp-includes/images/exe.png",
    "wp-includes/images/html.png",
    "wp-includes/images/js.png",
    "wp-includes/images/pdf.png",
    "wp-includes/images/swf.png",
    "wp-includes/images/tar.png",
    "wp-includes/images/text.png",
    "wp-includes/images/video.png",
    "wp-includes/images/zip.png",
    "wp-includes/js/tinymce/tiny_mce_config.php",
    "wp-includes/js/tinymce/tiny_mce_ext.js",
    // 2.8
    "wp-admin/js/users.js",
    "wp-includes/js/swfupload/plugins/swfupload.documentready.js",
    "wp-includes/js/swfupload/plugins/swfupload.graceful_degradation.js",
    "wp-includes/js/swfupload/swfupload_f9.swf",
    "wp-includes/js/tinymce/plugins/autosave",
    "wp-includes/js/tinymce/plugins/paste/css",
    "wp-includes/js/tinymce/utils/mclayer.js",
    "wp-includes/js/tinymce/wordpress.css",
    // 2.9
    "wp-admin/js/page.dev.js",
    "wp-admin/js/page.js",
    "wp-admin/js/set-post-thumbnail-handler.dev.js",
    "wp-admin/js/set-post-thumbnail-handler.js",
    "wp-admin/js/slug.dev.js",
    "wp-admin/js/slug.js",
    "wp-includes/gettext.php",
    "wp-includes/js/tinymce/plugins/wordpress/js",
    "wp-includes/streams.php",
    // MU
    "README.txt",
    "htaccess.dist",
    "index-install.php",
    "wp-admin/css/mu-rtl.css",
    "wp-admin/css/mu.css",
    "wp-admin/images/site-admin.png",
    "wp-admin/includes/mu.php",
    "wp-admin/wpmu-admin.php",
    "wp-admin/wpmu-blogs.php",
    "wp-admin/wpmu-edit.php",
    "wp-admin/wpmu-options.php",
    "wp-admin/wpmu-themes.php",
    "wp-admin/wpmu-upgrade-site.php",
    "wp-admin/wpmu-users.php",
    "wp-includes/images/wordpress-mu.png",
    "wp-includes/wpmu-default-filters.php",
    "wp-includes/wpmu-functions.php",
    "wpmu-settings.php",
    // 3.0
    "wp-admin/categories.php",
    "wp-admin/edit-category-form.php",
    "wp-admin/edit-page-form.php",
    "wp-admin/edit-pages.php",
    "wp-admin/images/admin-header-footer.png",
    "wp-admin/images/browse-happy.gif",
    "wp-admin/images/ico-add.png",
    "wp-admin/images/ico-close.png",
    "wp-admin/images/ico-edit.png",
    "wp-admin/images/ico-viewpage.png",
    "wp-admin/images/fav-top.png",
    "wp-admin/images/screen-options-left.gif",
    "wp-admin/images/wp-logo-vs.gif",
    "wp-admin/images/wp-logo.gif",
    "wp-admin/import",
    "wp-admin/js/wp-gears.dev.js",
    "wp-admin/js/wp-gears.js",
    "wp-admin/options-misc.php",
    "wp-admin/page-new.php",
    "wp-admin/page.php",
    "wp-admin/rtl.css",
    "wp-admin/rtl.dev.css",
    "wp-admin/update-links.php",
    "wp-admin/wp-admin.css",
    "wp-admin/wp-admin.dev.css",
    "wp-includes/js/codepress",
    "wp-includes/js/jquery/autocomplete.dev.js",
    "wp-includes/js/jquery/autocomplete.js",
    "wp-includes/js/jquery/interface.js",
    "wp-includes/js/scriptaculous/prototype.js",
    "wp-includes/js/tinymce/wp-tinymce.js",
    // 3.1
    "wp-admin/edit-attachment-rows.php",
    "wp-admin/edit-link-categories.php",
    "wp-admin/edit-link-category-form.php",
    "wp-admin/edit-post-rows.php",
    "wp-admin/images/button-grad-active-vs.png",
    "wp-admin/images/button-grad-vs.png",
    "wp-admin/images/fav-arrow-vs-rtl.gif",
    "wp-admin/images/fav-arrow-vs.gif",
    "wp-admin/images/fav-top-vs.gif",
    "wp-admin/images/list-vs.png",
    "wp-admin/images/screen-options-right-up.gif",
    "wp-admin/images/screen-options-right.gif",
    "wp-admin/images/visit-site-button-grad-vs.gif",
    "wp-admin/images/visit-site-button-grad.gif",
    "wp-admin/link-category.php",
    "wp-admin/sidebar.php",
    "wp-includes/classes.php",
    "wp-includes/js/tinymce/blank.htm",
    "wp-includes/js/tinymce/plugins/media/css/content.css",
    "wp-includes/js/tinymce/plugins/media/img",
    "wp-includes/js/tinymce/plugins/safari",
    // 3.2
    "wp-admin/images/logo-login.gif",
    "wp-admin/images/star.gif",
    "wp-admin/js/list-table.dev.js",
    "wp-admin/js/list-table.js",
    "wp-includes/default-embeds.php",
    "wp-includes/js/tinymce/plugins/wordpress/img/help.gif",
    "wp-includes/js/tinymce/plugins/wordpress/img/more.gif",
    "wp-includes/js/tinymce/plugins/wordpress/img/toolbars.gif",
    "wp-includes/js/tinymce/themes/advanced/img/fm.gif",
    "wp-includes/js/tinymce/themes/advanced/img/sflogo.png",
    // 3.3
    "wp-admin/css/colors-classic-rtl.css",
    "wp-admin/css/colors-classic-rtl.dev.css",
    "wp-admin/css/colors-fresh-rtl.css",
    "wp-admin/css/colors-fresh-rtl.dev.css",
    "wp-admin/css/dashboard-rtl.dev.css",
    "wp-admin/css/dashboard.dev.css",
    "wp-admin/css/global-rtl.css",
    "wp-admin/css/global-rtl.dev.css",
    "wp-admin/css/global.css",
    "wp-admin/css/global.dev.css",
    "wp-admin/css/install-rtl.dev.css",
    "wp-admin/css/login-rtl.dev.css",
    "wp-admin/css/login.dev.css",
    "wp-admin/css/ms.css",
    "wp-admin/css/ms.dev.css",
    "wp-admin/css/nav-menu-rtl.css",
    "wp-admin/css/nav-menu-rtl.dev.css",
    "wp-admin/css/nav-menu.css",
    "wp-admin/css/nav-menu.dev.css",
    "wp-admin/css/plugin-install-rtl.css",
    "wp-admin/css/plugin-install-rtl.dev.css",
    "wp-admin/css/plugin-install.css",
    "wp-admin/css/plugin-install.dev.css",
    "wp-admin/css/press-this-rtl.dev.css",
    "wp-admin/css/press-this.dev.css",
    "wp-admin/css/theme-editor-rtl.css",
    "wp-admin/css/theme-editor-rtl.dev.css",
    "wp-admin/css/theme-editor.css",
    "wp-admin/css/theme-editor.dev.css",
    "wp-admin/css/theme-install-rtl.css",
    "wp-admin/css/theme-install-rtl.dev.css",
    "wp-admin/css/theme-install.css",
    "wp-admin/css/theme-install.dev.css",
    "wp-admin/css/widgets-rtl.dev.css",
    "wp-admin/css/widgets.dev.css",
    "wp-admin/includes/internal-linking.php",
    "wp-includes/images/admin-bar-sprite-rtl.png",
    "wp-includes/js/jquery/ui.button.js",
    "wp-includes/js/jquery/ui.core.js",
    "wp-includes/js/jquery/ui.dialog.js",
    "wp-includes/js/jquery/ui.draggable.js",
    "wp-includes/js/jquery/ui.droppable.js",
    "wp-includes/js/jquery/ui.mouse.js",
    "wp-includes/js/jquery/ui.position.js",
    "wp-includes/js/jquery/ui.resizable.js",
    "wp-includes/js/jquery/ui.selectable.js",
    "wp-includes/js/jquery/ui.sortable.js",
    "wp-includes/js/jquery/ui.tabs.js",
    "wp-includes/js/jquery/ui.widget.js",
    "wp-includes/js/l10n.dev.js",
    "wp-includes/js/l10n.js",
    "wp-includes/js/tinymce/plugins/wplink/css",
    "wp-includes/js/tinymce/plugins/wplink/img",
    "wp-includes/js/tinymce/plugins/wplink/js",
    "wp-includes/js/tinymce/themes/advanced/img/wpicons.png",
    "wp-includes/js/tinymce/themes/advanced/skins/wp_theme/img/butt2.png",
    "wp-includes/js/tinymce/themes/advanced/skins/wp_theme/img/button_bg.png",
    "wp-includes/js/tinymce/themes/advanced/skins/wp_theme/img/down_arrow.gif",
    "wp-includes/js/tinymce/themes/advanced/skins/wp_theme/img/fade-butt.png",
    "wp-includes/js/tinymce/themes/advanced/skins/wp_theme/img/separator.gif",
    // 3.4
    "wp-admin/images/gray-star.png",
    "wp-admin/images/logo-login.png",
    "wp-admin/images/star.png",
    "wp-admin/index-extra.php",
    "wp-admin/network/index-extra.php",
    "wp-admin/user/index-extra.php",
    "wp-admin/images/screenshots/admin-flyouts.png",
    "wp-admin/images/screenshots/coediting.png",
    "wp-admin/images/screenshots/drag-and-drop.png",
    "wp-admin/images/screenshots/help-screen.png",
    "wp-admin/images/screenshots/media-icon.png",
    "wp-admin/images/screenshots/new-feature-pointer.png",
    "wp-admin/images/screenshots/welcome-screen.png",
    "wp-includes/css/editor-buttons.css",
    "wp-includes/css/editor-buttons.dev.css",
    "wp-includes/js/tinymce/plugins/paste/blank.htm",
    "wp-includes/js/tinymce/plugins/wordpress/css",
    "wp-includes/js/tinymce/plugins/wordpress/editor_plugin.dev.js",
    "wp-includes/js/tinymce/plugins/wordpress/img/embedded.png",
    "wp-includes/js/tinymce/plugins/wordpress/img/more_bug.gif",
    "wp-includes/js/tinymce/plugins/wordpress/img/page_bug.gif",
    "wp-includes/js/tinymce/plugins/wpdialogs/editor_plugin.dev.js",
    "wp-includes/js/tinymce/plugins/wpeditimage/css/editimage-rtl.css",
    "wp-includes/js/tinymce/plugins/wpeditimage/editor_plugin.dev.js",
    "wp-includes/js/tinymce/plugins/wpfullscreen/editor_plugin.dev.js",
    "wp-includes/js/tinymce/plugins/wpgallery/editor_plugin.dev.js",
    "wp-includes/js/tinymce/plugins/wpgallery/img/gallery.png",
    "wp-includes/js/tinymce/plugins/wplink/editor_plugin.dev.js",
    // 3.5
    "wp-app.php",
    "wp-includes/class-wp-atom-server.php",
    "wp-includes/js/tinymce/themes/advanced/skins/wp_theme/ui.css",
    "wp-admin/js/cat.dev.js",
    "wp-admin/js/cat.js",
    "wp-admin/js/password-strength-meter.dev.js",
    "wp-admin/js/password-strength-meter.js",
    "wp-admin/images/wpspin_dark.gif",
    "wp-admin/images/wpspin_light.gif",
    "wp-includes/js/jquery/ui/jquery.effects.blind.min.js",
    "wp-includes/js/jquery/ui/jquery.effects.bounce.min.js",
    "wp-includes/js/jquery/ui/jquery.effects.core.min.js",
    "wp-includes/js/jquery/ui/jquery.ui.core.min.js",
    "wp-includes/js/jquery/ui/jquery.ui.widget.min.js",
    "wp-includes/js/swfupload/swfupload-all.js",
    "wp-includes/js/tinymce/langs/wp-langs.php",
];

/// Which provider produces the known list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// `update-core` when the installation ships one, `bundled` otherwise.
    #[default]
    Auto,
    Bundled,
    UpdateCore,
    File,
}

impl FromStr for SourceKind {
    type Err = OcfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SourceKind::Auto),
            "bundled" => Ok(SourceKind::Bundled),
            "update-core" | "update_core" => Ok(SourceKind::UpdateCore),
            "file" => Ok(SourceKind::File),
            _ => Err(OcfError::UnknownSource(s.to_string())),
        }
    }
}

pub trait KnownPathSource {
    /// Human-readable origin, shown in reports.
    fn describe(&self) -> String;

    /// The known obsolete paths, relative to the installation root, in
    /// provider order. Duplicates are kept.
    fn load(&self) -> Result<Vec<String>, OcfError>;
}

/// The compiled-in list.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bundled;

impl KnownPathSource for Bundled {
    fn describe(&self) -> String {
        "bundled list".to_string()
    }

    fn load(&self) -> Result<Vec<String>, OcfError> {
        Ok(BUNDLED_OLD_FILES.iter().map(|p| p.to_string()).collect())
    }
}

/// A plain text file with one relative path per line. Blank lines and
/// lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct ListFile {
    pub path: PathBuf,
}

impl KnownPathSource for ListFile {
    fn describe(&self) -> String {
        format!("list file {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<String>, OcfError> {
        let content = fs::read_to_string(&self.path).map_err(|e| OcfError::io(&self.path, e))?;
        Ok(parse_list(&content))
    }
}

/// The `$_old_files` array of the installation's own upgrader.
#[derive(Debug, Clone)]
pub struct UpdateCore {
    pub path: PathBuf,
}

impl UpdateCore {
    pub fn under(root: &Path) -> Self {
        UpdateCore { path: join_root(root, UPDATE_CORE_PHP) }
    }
}

impl KnownPathSource for UpdateCore {
    fn describe(&self) -> String {
        format!("$_old_files in {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<String>, OcfError> {
        let source = fs::read_to_string(&self.path).map_err(|e| OcfError::io(&self.path, e))?;
        php::extract_string_array(&source, "_old_files")
            .ok_or_else(|| OcfError::OldFilesNotFound { path: self.path.clone() })
    }
}

pub(crate) fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Fails unless `root` is an existing directory. Scanning a mistyped root
/// would otherwise report a clean installation.
pub fn ensure_root(root: &Path) -> Result<(), OcfError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(OcfError::RootNotFound { path: root.to_path_buf() })
    }
}

/// Picks the provider for `kind`. `list` is required for [`SourceKind::File`].
pub fn resolve_source(
    kind: SourceKind,
    root: &Path,
    list: Option<&Path>,
) -> Result<Box<dyn KnownPathSource>, OcfError> {
    let source: Box<dyn KnownPathSource> = match kind {
        SourceKind::Bundled => Box::new(Bundled),
        SourceKind::UpdateCore => Box::new(UpdateCore::under(root)),
        SourceKind::File => {
            let path = list.ok_or(OcfError::ListFileMissing)?;
            Box::new(ListFile { path: path.to_path_buf() })
        }
        SourceKind::Auto => {
            let update_core = UpdateCore::under(root);
            if update_core.path.is_file() {
                Box::new(update_core)
            } else {
                debug!("{} not found, falling back to bundled list", update_core.path.display());
                Box::new(Bundled)
            }
        }
    };
    Ok(source)
}

/// Reads `$wp_version` from the installation, if it can be found.
pub fn installed_version(root: &Path) -> Option<String> {
    let path = join_root(root, VERSION_PHP);
    let source = fs::read_to_string(&path).ok()?;
    php::extract_string_assignment(&source, "wp_version")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) -> Result<()> {
        let path = join_root(root, relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    #[test]
    fn bundled_list_is_relative() {
        let list = Bundled.load().unwrap();
        assert_eq!(list.len(), BUNDLED_OLD_FILES.len());
        assert!(list.iter().all(|p| !p.starts_with('/') && !p.is_empty()));
    }

    #[test]
    fn list_file_skips_comments_and_keeps_duplicates() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("old.txt");
        fs::write(&path, "# removed in 3.5\nwp-app.php\n\n  wp-admin/cat.js  \nwp-app.php\n")?;
        let list = ListFile { path }.load()?;
        assert_eq!(list, vec!["wp-app.php", "wp-admin/cat.js", "wp-app.php"]);
        Ok(())
    }

    #[test]
    fn missing_list_file_is_io_error() {
        let err = ListFile { path: PathBuf::from("/definitely/not/here.txt") }.load().unwrap_err();
        assert!(matches!(err, OcfError::Io { .. }));
    }

    #[test]
    fn update_core_reads_installation_list() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), UPDATE_CORE_PHP, "<?php\n$_old_files = array(\n// 3.5\n'wp-app.php',\n'wp-admin/js/cat.js',\n);\n")?;
        let list = UpdateCore::under(dir.path()).load()?;
        assert_eq!(list, vec!["wp-app.php", "wp-admin/js/cat.js"]);
        Ok(())
    }

    #[test]
    fn update_core_without_assignment_is_error() -> Result<()> {
        let dir = tempdir()?;
        write(dir.path(), UPDATE_CORE_PHP, "<?php\nfunction update_core() {}\n")?;
        let err = UpdateCore::under(dir.path()).load().unwrap_err();
        assert!(matches!(err, OcfError::OldFilesNotFound { .. }));
        Ok(())
    }

    #[test]
    fn auto_prefers_update_core_when_present() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(resolve_source(SourceKind::Auto, dir.path(), None)?.describe(), "bundled list");

        write(dir.path(), UPDATE_CORE_PHP, "<?php $_old_files = array('x.php');")?;
        let source = resolve_source(SourceKind::Auto, dir.path(), None)?;
        assert!(source.describe().contains("update-core.php"));
        assert_eq!(source.load()?, vec!["x.php"]);
        Ok(())
    }

    #[test]
    fn ensure_root_requires_existing_directory() -> Result<()> {
        let dir = tempdir()?;
        ensure_root(dir.path())?;

        let file = dir.path().join("wp-config.php");
        fs::write(&file, "<?php")?;
        assert!(matches!(ensure_root(&file), Err(OcfError::RootNotFound { .. })));
        assert!(matches!(ensure_root(&dir.path().join("missing")), Err(OcfError::RootNotFound { .. })));
        Ok(())
    }

    #[test]
    fn file_source_requires_list() {
        let err = resolve_source(SourceKind::File, Path::new("."), None).err().unwrap();
        assert!(matches!(err, OcfError::ListFileMissing));
    }

    #[test]
    fn source_kind_parses_names() {
        assert_eq!("update-core".parse::<SourceKind>().unwrap(), SourceKind::UpdateCore);
        assert_eq!("Bundled".parse::<SourceKind>().unwrap(), SourceKind::Bundled);
        assert!("ftp".parse::<SourceKind>().is_err());
    }

    #[test]
    fn installed_version_is_optional() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(installed_version(dir.path()), None);
        write(dir.path(), VERSION_PHP, "<?php\n$wp_version = '3.5.1';\n")?;
        assert_eq!(installed_version(dir.path()).as_deref(), Some("3.5.1"));
        Ok(())
    }
}
